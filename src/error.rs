//! Errors surfaced by the vulnerability lookup service.
//!
//! Callers branch on the variant, not the message: [`AuditError::RateLimited`]
//! means credentials should be configured, anything else is an
//! [`AuditError::LookupFailed`] carrying its original cause.

use thiserror::Error;

/// Boxed cause kept by [`AuditError::LookupFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Instructions shown when the lookup service rate limits an anonymous client.
pub const RATE_LIMIT_MESSAGE: &str = "You have been rate limited by OSS Index.
If you do not have a OSS Index account, please visit https://ossindex.sonatype.org/user/register to register an account.
After registering and verifying your account, you can retrieve your username (Email Address), and API Token
at https://ossindex.sonatype.org/user/settings. Upon retrieving those, run 'ossaudit config', set your OSS Index
settings, and rerun ossaudit.";

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    #[error("An error occurred: {message}, err: {source}")]
    LookupFailed {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl AuditError {
    /// Wraps a lookup failure that is not rate limiting.
    pub fn lookup(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        AuditError::LookupFailed {
            message: message.into(),
            source: cause.into(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AuditError::RateLimited)
    }
}

pub type AuditResult<T> = Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_rate_limit_message_directs_to_register_and_config() {
        let message = AuditError::RateLimited.to_string();
        assert!(message.contains("rate limited"));
        assert!(message.contains("register an account"));
        assert!(message.contains("run 'ossaudit config'"));
        assert!(message.lines().count() > 1);
    }

    #[test]
    fn test_rate_limited_has_no_source() {
        let err = AuditError::RateLimited;
        assert!(err.is_rate_limited());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_lookup_failed_renders_message_and_cause() {
        let cause = io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer");
        let err = AuditError::lookup("requesting component reports", cause);

        let rendered = err.to_string();
        assert!(rendered.contains("requesting component reports"));
        assert!(rendered.contains("connection reset by peer"));
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_lookup_failed_keeps_cause_for_chaining() {
        let err = AuditError::lookup("decoding response", "unexpected end of input");
        let source = err.source().expect("cause is retained");
        assert_eq!(source.to_string(), "unexpected end of input");
    }

    #[test]
    fn test_variants_are_distinguishable_through_anyhow() {
        let err: anyhow::Error = AuditError::RateLimited.into();
        match err.downcast_ref::<AuditError>() {
            Some(AuditError::RateLimited) => {}
            other => panic!("expected rate limit error, got {:?}", other),
        }
    }
}
