//! Vulnerability exclusions.
//!
//! Exclusion tokens come from command line flags and from an ignore file.
//! The ignore file holds one CVE or vulnerability ID per line:
//!
//! ```text
//! # accepted until the upstream fix lands
//! CVE-2020-27813 until=2030-01-31
//! SONATYPE-2019-0115
//! ```
//!
//! Entries whose `until` date has passed are dropped when the file is read.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::model::Coordinate;

/// Default ignore file name, looked up in the working directory.
pub const DEFAULT_IGNORE_FILE: &str = ".ossaudit-ignore";

const UNTIL_PREFIX: &str = "until=";

/// Applies `exclusions` to every coordinate.
///
/// Returns how many vulnerabilities were newly excluded.
pub fn exclude_all<S: AsRef<str>>(coordinates: &mut [Coordinate], exclusions: &[S]) -> usize {
    let mut total = 0;
    for coordinate in coordinates.iter_mut() {
        let excluded = coordinate.exclude_vulnerabilities(exclusions);
        if excluded > 0 {
            tracing::debug!(
                coordinate = %coordinate.coordinates,
                excluded,
                "excluded vulnerabilities"
            );
        }
        total += excluded;
    }
    total
}

/// A single ignore file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub token: String,
    /// Last day on which the exclusion applies.
    pub until: Option<NaiveDate>,
}

impl Exclusion {
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.until.map_or(true, |until| today <= until)
    }
}

/// Parses ignore file content, keeping only entries active on `today`.
///
/// # Errors
///
/// Returns an error naming the line if an `until=` date is malformed or a
/// line has unexpected trailing text.
pub fn parse_ignore(content: &str, today: NaiveDate) -> Result<Vec<Exclusion>> {
    let mut exclusions = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let token = match parts.next() {
            Some(token) => token.to_string(),
            None => continue,
        };

        let until = match parts.next() {
            Some(field) => {
                let Some(date) = field.strip_prefix(UNTIL_PREFIX) else {
                    bail!("line {}: unexpected text '{}'", line_no, field);
                };
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .with_context(|| format!("line {}: invalid date '{}'", line_no, date))?;
                Some(date)
            }
            None => None,
        };

        if let Some(extra) = parts.next() {
            bail!("line {}: unexpected text '{}'", line_no, extra);
        }

        let exclusion = Exclusion { token, until };
        if exclusion.is_active(today) {
            exclusions.push(exclusion);
        } else {
            tracing::warn!(
                token = %exclusion.token,
                until = ?exclusion.until,
                "exclusion expired, vulnerability will be reported"
            );
        }
    }

    Ok(exclusions)
}

/// Reads an ignore file and returns the tokens active on `today`.
pub fn load_ignore_file(path: &Path, today: NaiveDate) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read ignore file {}", path.display()))?;
    let exclusions = parse_ignore(&content, today)
        .with_context(|| format!("failed to parse ignore file {}", path.display()))?;
    Ok(exclusions.into_iter().map(|e| e.token).collect())
}
