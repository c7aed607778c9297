//! TXT lookups over DNS using hickory-resolver

use std::str::FromStr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::proto::rr::Name;
use tokio::time::timeout;
use tracing::{debug, error, instrument};

use crate::error::ResolveError;
use crate::traits::TxtSource;

/// Default lookup timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Check that `domain` is a usable DNS name before querying it
///
/// # Errors
/// Returns [`ResolveError::InvalidDomain`] for empty or unparsable names.
pub fn validate_domain(domain: &str) -> Result<(), ResolveError> {
    let trimmed = domain.trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(ResolveError::InvalidDomain {
            domain: domain.to_string(),
            reason: "domain is empty".to_string(),
        });
    }

    Name::from_str(trimmed)
        .map(|_| ())
        .map_err(|e| ResolveError::InvalidDomain {
            domain: domain.to_string(),
            reason: e.to_string(),
        })
}

/// TXT source backed by the system resolver configuration
///
/// Reads `/etc/resolv.conf` (or the platform equivalent) on every lookup; no
/// answers are cached between runs.
#[derive(Debug, Clone)]
pub struct HickoryTxtSource {
    /// Overall lookup timeout
    timeout: Duration,
}

impl HickoryTxtSource {
    /// Create a source with the default timeout
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set lookup timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lookup timeout in use
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn query(&self, domain: &str) -> Result<Vec<String>, ResolveError> {
        let mut builder = TokioResolver::builder_tokio()
            .map_err(|e| ResolveError::ConfigError(e.to_string()))?;
        builder.options_mut().timeout = self.timeout;
        let resolver = builder.build();

        let lookup = resolver.txt_lookup(domain).await.map_err(|e| {
            if e.is_no_records_found() {
                ResolveError::NoRecords(domain.to_string())
            } else {
                ResolveError::LookupFailed {
                    domain: domain.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        Ok(lookup
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|data| String::from_utf8_lossy(data).to_string())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect())
    }
}

impl Default for HickoryTxtSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TxtSource for HickoryTxtSource {
    #[instrument(skip(self), level = "debug")]
    async fn lookup(&self, domain: &str) -> Result<Vec<String>, ResolveError> {
        validate_domain(domain)?;

        let start = Instant::now();
        debug!(domain = %domain, timeout = ?self.timeout, "querying TXT records");

        match timeout(self.timeout, self.query(domain)).await {
            Ok(Ok(records)) => {
                debug!(
                    domain = %domain,
                    count = records.len(),
                    duration = ?start.elapsed(),
                    "TXT lookup completed"
                );
                Ok(records)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                error!(
                    domain = %domain,
                    timeout = ?self.timeout,
                    elapsed = ?start.elapsed(),
                    "TXT lookup timed out"
                );
                Err(ResolveError::Timeout {
                    domain: domain.to_string(),
                    timeout: self.timeout,
                })
            }
        }
    }

    fn source_type(&self) -> &'static str {
        "dns"
    }
}
