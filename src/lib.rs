pub mod config;
pub mod error;
pub mod exclusion;
pub mod input;
pub mod model;
pub mod output;
pub mod purl;

pub use config::Configuration;
pub use error::{AuditError, AuditResult};
pub use model::{AuditReport, AuditRequest, AuditSummary, Coordinate, Vulnerability};
