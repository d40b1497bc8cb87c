//! Loading saved lookup results and coordinate lists.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::model::Coordinate;
use crate::purl::PackageUrl;

/// Reads a JSON array of component reports.
///
/// Coordinates whose version is not valid semver are flagged.
pub fn load_coordinates(path: &Path) -> Result<Vec<Coordinate>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read lookup results {}", path.display()))?;
    let mut coordinates: Vec<Coordinate> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse lookup results {}", path.display()))?;

    let flagged = flag_invalid_semver(&mut coordinates);
    tracing::debug!(count = coordinates.len(), flagged, "loaded coordinates");
    Ok(coordinates)
}

/// Sets `invalid_semver` on coordinates without a semver version.
///
/// Returns how many coordinates were flagged. Existing flags are kept.
pub fn flag_invalid_semver(coordinates: &mut [Coordinate]) -> usize {
    let mut flagged = 0;
    for coordinate in coordinates.iter_mut() {
        let valid = PackageUrl::parse(&coordinate.coordinates)
            .map(|purl| purl.has_valid_semver())
            .unwrap_or(false);
        if !valid {
            coordinate.invalid_semver = true;
            flagged += 1;
        }
    }
    flagged
}

/// Reads coordinate strings, one per line. Blank lines and `#` comments are skipped.
pub fn load_coordinate_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read coordinate list {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
