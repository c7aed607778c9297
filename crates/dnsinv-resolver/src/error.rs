//! Error types for dnsinv-resolver

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while fetching TXT records
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// Domain is empty or not a valid DNS name
    #[error("invalid domain `{domain}`: {reason}")]
    InvalidDomain {
        /// Domain as configured
        domain: String,
        /// Why it was rejected
        reason: String,
    },

    /// Domain exists but has no TXT records, or does not exist
    #[error("no TXT records found for {0}")]
    NoRecords(String),

    /// Lookup failed
    #[error("TXT lookup for {domain} failed: {reason}")]
    LookupFailed {
        /// Domain queried
        domain: String,
        /// Resolver error message
        reason: String,
    },

    /// Lookup timed out
    #[error("TXT lookup for {domain} timed out after {timeout:?}")]
    Timeout {
        /// Domain queried
        domain: String,
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// Resolver could not be configured from the system
    #[error("resolver configuration error: {0}")]
    ConfigError(String),

    /// I/O error reading a record file
    #[error("I/O error: {0}")]
    IoError(String),
}

impl ResolveError {
    /// Check if error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ResolveError::LookupFailed { .. } | ResolveError::Timeout { .. }
        )
    }
}
