use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Counts shown at the end of an audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub audited: usize,
    pub vulnerable: usize,
    pub vulnerabilities: usize,
    pub excluded: usize,
    pub invalid_semver: usize,
}

impl AuditSummary {
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Self {
        let mut summary = Self {
            audited: coordinates.len(),
            ..Self::default()
        };

        for coordinate in coordinates {
            if coordinate.is_vulnerable() {
                summary.vulnerable += 1;
            }
            if coordinate.invalid_semver {
                summary.invalid_semver += 1;
            }
            summary.vulnerabilities += coordinate.vulnerabilities.len();
            summary.excluded += coordinate.excluded_vulnerabilities().count();
        }

        summary
    }
}

/// Audited coordinates ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub audit_time: DateTime<Utc>,
    pub summary: AuditSummary,
    pub coordinates: Vec<Coordinate>,
}

impl AuditReport {
    /// Builds a report from coordinates that already went through exclusion.
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            audit_time: Utc::now(),
            summary: AuditSummary::from_coordinates(&coordinates),
            coordinates,
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        self.summary.vulnerable > 0
    }

    pub fn vulnerable(&self) -> impl Iterator<Item = &Coordinate> {
        self.coordinates.iter().filter(|c| c.is_vulnerable())
    }
}
