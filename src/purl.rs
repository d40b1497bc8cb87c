//! Minimal package URL handling.
//!
//! Only the parts needed to audit a coordinate are extracted: ecosystem,
//! name and version. Qualifiers and subpaths are not interpreted.

use std::fmt;

/// A parsed `pkg:<ecosystem>/<name>@<version>` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageUrl<'a> {
    pub ecosystem: &'a str,
    pub name: &'a str,
    pub version: &'a str,
}

impl<'a> PackageUrl<'a> {
    /// Parses a coordinate string, returning `None` if any part is missing.
    ///
    /// ```
    /// use ossaudit::purl::PackageUrl;
    ///
    /// let purl = PackageUrl::parse("pkg:golang/github.com/gorilla/websocket@v1.4.0").unwrap();
    /// assert_eq!(purl.ecosystem, "golang");
    /// assert_eq!(purl.name, "github.com/gorilla/websocket");
    /// assert_eq!(purl.version, "v1.4.0");
    /// ```
    pub fn parse(coordinate: &'a str) -> Option<Self> {
        let rest = coordinate.strip_prefix("pkg:")?;
        // Drop qualifiers and subpath
        let rest = rest.split(['?', '#']).next()?;
        let (ecosystem, rest) = rest.split_once('/')?;
        let (name, version) = rest.rsplit_once('@')?;

        if ecosystem.is_empty() || name.is_empty() || version.is_empty() {
            return None;
        }

        Some(Self {
            ecosystem,
            name,
            version,
        })
    }

    /// Returns true if the version is valid semver, allowing a leading `v`.
    pub fn has_valid_semver(&self) -> bool {
        is_valid_semver(self.version)
    }
}

impl fmt::Display for PackageUrl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pkg:{}/{}@{}", self.ecosystem, self.name, self.version)
    }
}

pub fn is_valid_semver(version: &str) -> bool {
    semver::Version::parse(version.trim_start_matches('v')).is_ok()
}
