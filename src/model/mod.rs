//! Core data types for audited coordinates and their vulnerabilities.
//!
//! - [`Coordinate`] - A scanned dependency and the vulnerabilities found for it
//! - [`Vulnerability`] - A known vulnerability, possibly excluded
//! - [`AuditRequest`] - The payload submitted to a vulnerability lookup service
//! - [`AuditReport`] - Audited coordinates with summary counts
//!
//! # Example
//!
//! ```
//! use ossaudit::{Coordinate, Vulnerability};
//!
//! let mut coordinate = Coordinate::new("pkg:golang/github.com/gorilla/websocket@1.4.0")
//!     .with_vulnerability(Vulnerability::new("SONATYPE-1").with_cve("CVE-2020-27813"));
//!
//! coordinate.exclude_vulnerabilities(&["CVE-2020-27813"]);
//! assert!(!coordinate.is_vulnerable());
//! ```

mod coordinate;
mod report;
mod request;
mod vulnerability;

pub use coordinate::*;
pub use report::*;
pub use request::*;
pub use vulnerability::*;
