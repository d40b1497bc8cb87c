use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A known vulnerability affecting a coordinate.
///
/// Field names follow the lookup service's JSON. The CVSS score and vector
/// are carried as received and never interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vulnerability {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(
        serialize_with = "rust_decimal::serde::arbitrary_precision::serialize",
        deserialize_with = "deserialize_score"
    )]
    pub cvss_score: Decimal,
    pub cvss_vector: String,
    /// Empty when the record has no CVE mapping.
    pub cve: String,
    pub reference: String,
    pub excluded: bool,
}

impl Vulnerability {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cvss(mut self, score: Decimal, vector: impl Into<String>) -> Self {
        self.cvss_score = score;
        self.cvss_vector = vector.into();
        self
    }

    pub fn with_cve(mut self, cve: impl Into<String>) -> Self {
        self.cve = cve.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Returns true if `token` names this vulnerability by CVE or by ID.
    ///
    /// Matching is exact. An empty field never matches, so an empty token
    /// cannot exclude records that lack a CVE.
    pub fn matches_exclusion(&self, token: &str) -> bool {
        (!self.cve.is_empty() && self.cve == token) || (!self.id.is_empty() && self.id == token)
    }

    /// Marks the vulnerability excluded if any token matches.
    ///
    /// Returns true only when this call changed the flag.
    pub fn maybe_exclude<S: AsRef<str>>(&mut self, exclusions: &[S]) -> bool {
        if self.excluded {
            return false;
        }
        if exclusions.iter().any(|ex| self.matches_exclusion(ex.as_ref())) {
            self.excluded = true;
            return true;
        }
        false
    }
}

/// Reads an exact score, treating `null` as zero.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let score: Option<Decimal> =
        rust_decimal::serde::arbitrary_precision_option::deserialize(deserializer)?;
    Ok(score.unwrap_or(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_matches_by_cve_or_id() {
        let vuln = Vulnerability::new("SONATYPE-1").with_cve("CVE-2020-1");
        assert!(vuln.matches_exclusion("CVE-2020-1"));
        assert!(vuln.matches_exclusion("SONATYPE-1"));
        assert!(!vuln.matches_exclusion("CVE-2020-2"));
    }

    #[test]
    fn test_match_is_exact() {
        let vuln = Vulnerability::new("SONATYPE-1").with_cve("CVE-2020-1");
        assert!(!vuln.matches_exclusion("cve-2020-1"));
        assert!(!vuln.matches_exclusion(" CVE-2020-1"));
        assert!(!vuln.matches_exclusion("CVE-2020-*"));
    }

    #[test]
    fn test_empty_token_never_matches() {
        let vuln = Vulnerability::new("");
        assert!(!vuln.matches_exclusion(""));

        let vuln = Vulnerability::new("SONATYPE-2");
        assert!(!vuln.matches_exclusion(""));
    }

    #[test]
    fn test_maybe_exclude_reports_change_once() {
        let mut vuln = Vulnerability::new("SONATYPE-1");
        assert!(vuln.maybe_exclude(&["SONATYPE-1"]));
        assert!(vuln.excluded);
        assert!(!vuln.maybe_exclude(&["SONATYPE-1"]));
        assert!(!vuln.maybe_exclude::<&str>(&[]));
        assert!(vuln.excluded);
    }

    #[test]
    fn test_deserialize_keeps_decimal_precision() {
        let json = r#"{
            "id": "SONATYPE-1",
            "title": "[CVE-2020-1] Improper Input Validation",
            "cvssScore": 7.5,
            "cvssVector": "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:H",
            "cve": "CVE-2020-1",
            "displayName": "CVE-2020-1"
        }"#;

        let vuln: Vulnerability = serde_json::from_str(json).unwrap();
        assert_eq!(vuln.cvss_score, Decimal::from_str("7.5").unwrap());
        assert_eq!(vuln.cve, "CVE-2020-1");
        assert!(vuln.description.is_empty());
        assert!(!vuln.excluded);
    }

    #[test]
    fn test_missing_score_defaults_to_zero() {
        let vuln: Vulnerability = serde_json::from_str(r#"{"id": "X"}"#).unwrap();
        assert_eq!(vuln.cvss_score, Decimal::ZERO);
    }

    #[test]
    fn test_null_score_defaults_to_zero() {
        let vuln: Vulnerability =
            serde_json::from_str(r#"{"id": "X", "cvssScore": null, "cve": "CVE-2020-1"}"#).unwrap();
        assert_eq!(vuln.cvss_score, Decimal::ZERO);
        assert_eq!(vuln.cve, "CVE-2020-1");
    }

    #[test]
    fn test_serialize_writes_exact_score() {
        let vuln = Vulnerability::new("X").with_cvss(Decimal::new(75, 1), "CVSS:3.1/AV:N");
        let json = serde_json::to_string(&vuln).unwrap();
        assert!(json.contains(r#""cvssScore":7.5"#));
    }
}
