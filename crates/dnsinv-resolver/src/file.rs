//! TXT records read from a file
//!
//! Accepts the output of `dig +short -t TXT <domain>`: one record per line,
//! each made of one or more quoted character-strings.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::ResolveError;
use crate::traits::TxtSource;

/// TXT source backed by a local file
#[derive(Debug, Clone)]
pub struct FileTxtSource {
    path: PathBuf,
}

impl FileTxtSource {
    /// Create a source reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File the records are read from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split file contents into records, skipping blank and `;` comment lines
    fn parse(contents: &str) -> Vec<String> {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(';'))
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl TxtSource for FileTxtSource {
    #[instrument(skip(self), fields(path = %self.path.display()), level = "debug")]
    async fn lookup(&self, domain: &str) -> Result<Vec<String>, ResolveError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ResolveError::IoError(format!("{}: {e}", self.path.display())))?;

        let records = Self::parse(&contents);
        debug!(domain = %domain, count = records.len(), "read TXT records from file");

        Ok(records)
    }

    fn source_type(&self) -> &'static str {
        "file"
    }
}
