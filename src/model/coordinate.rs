use serde::{Deserialize, Serialize};

use super::Vulnerability;

/// A scanned dependency together with the vulnerabilities reported for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Coordinate {
    /// Package coordinate, e.g. `pkg:golang/github.com/gorilla/websocket@1.4.0`.
    pub coordinates: String,
    pub reference: String,
    /// In the order the lookup service returned them.
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(rename = "invalidSemVer")]
    pub invalid_semver: bool,
}

impl Coordinate {
    pub fn new(coordinates: impl Into<String>) -> Self {
        Self {
            coordinates: coordinates.into(),
            ..Self::default()
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_vulnerability(mut self, vulnerability: Vulnerability) -> Self {
        self.vulnerabilities.push(vulnerability);
        self
    }

    /// Returns true if at least one vulnerability is not excluded.
    pub fn is_vulnerable(&self) -> bool {
        self.vulnerabilities.iter().any(|v| !v.excluded)
    }

    /// Marks every vulnerability whose CVE or ID appears in `exclusions`.
    ///
    /// Entries are flagged, never removed or reordered. Returns the number of
    /// vulnerabilities newly excluded by this call.
    pub fn exclude_vulnerabilities<S: AsRef<str>>(&mut self, exclusions: &[S]) -> usize {
        if exclusions.is_empty() {
            return 0;
        }

        self.vulnerabilities
            .iter_mut()
            .map(|v| v.maybe_exclude(exclusions))
            .filter(|changed| *changed)
            .count()
    }

    pub fn live_vulnerabilities(&self) -> impl Iterator<Item = &Vulnerability> {
        self.vulnerabilities.iter().filter(|v| !v.excluded)
    }

    pub fn excluded_vulnerabilities(&self) -> impl Iterator<Item = &Vulnerability> {
        self.vulnerabilities.iter().filter(|v| v.excluded)
    }
}
