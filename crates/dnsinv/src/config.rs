//! Configuration loading and types
//!
//! Settings come from the environment, with CLI flags taking precedence.

use std::path::PathBuf;
use std::time::Duration;

use dnsinv_inventory::DecodeMode;
use dnsinv_resolver::{DEFAULT_TIMEOUT, FileTxtSource, HickoryTxtSource, TxtSource, validate_domain};
use eyre::{WrapErr, eyre};

/// Environment variable naming the domain whose TXT records hold the inventory
pub const DOMAIN_ENV: &str = "ANSIBLE_INVENTORY_DNS_DOMAIN";

/// Environment variable holding the lookup timeout in seconds
pub const TIMEOUT_ENV: &str = "DNSINV_TIMEOUT_SECS";

/// Domain used when nothing else is configured
pub const DEFAULT_DOMAIN: &str = "_ansible.yourdomain.com";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--domain`
    pub domain: Option<String>,
    /// `--timeout`
    pub timeout_secs: Option<u64>,
    /// `--records-file`
    pub records_file: Option<PathBuf>,
    /// `--strict`
    pub strict: bool,
}

/// Runtime configuration for a `--list` run
#[derive(Debug, Clone)]
pub struct Config {
    /// Domain to query
    pub domain: String,
    /// DNS lookup timeout
    pub timeout: Duration,
    /// Read records from this file instead of DNS
    pub records_file: Option<PathBuf>,
    /// Decode issue handling
    pub mode: DecodeMode,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    /// Returns error if the domain is not a valid DNS name or the timeout is
    /// not a number of seconds
    pub fn load(overrides: Overrides) -> eyre::Result<Self> {
        Self::from_env(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary environment lookup
    ///
    /// # Errors
    /// Same as [`Config::load`]
    pub fn from_env<F>(overrides: Overrides, env: F) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = match overrides
            .domain
            .or_else(|| env(DOMAIN_ENV).filter(|d| !d.is_empty()))
        {
            Some(domain) => domain,
            None => {
                tracing::warn!(
                    default = DEFAULT_DOMAIN,
                    "{DOMAIN_ENV} is not set, using default domain"
                );
                DEFAULT_DOMAIN.to_string()
            }
        };
        validate_domain(&domain).wrap_err("invalid inventory domain")?;

        let timeout = match overrides.timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => match env(TIMEOUT_ENV) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| eyre!("{TIMEOUT_ENV}={raw:?} is not a number of seconds: {e}"))?,
                None => DEFAULT_TIMEOUT,
            },
        };
        if timeout.is_zero() {
            return Err(eyre!("lookup timeout must be greater than zero"));
        }

        let mode = if overrides.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        };

        Ok(Self {
            domain,
            timeout,
            records_file: overrides.records_file,
            mode,
        })
    }

    /// Build the TXT source this configuration selects
    #[must_use]
    pub fn source(&self) -> Box<dyn TxtSource> {
        match &self.records_file {
            Some(path) => Box::new(FileTxtSource::new(path.clone())),
            None => Box::new(HickoryTxtSource::new().with_timeout(self.timeout)),
        }
    }
}
