//! TXT record source trait

use async_trait::async_trait;

use crate::error::ResolveError;

/// Something that can answer a TXT query for a domain
///
/// Each returned string is one TXT record with its character-strings already
/// concatenated. Quotes and whitespace may still be present; see
/// [`crate::normalize::normalize_txt`].
#[async_trait]
pub trait TxtSource: Send + Sync {
    /// Fetch every TXT record for `domain`
    async fn lookup(&self, domain: &str) -> Result<Vec<String>, ResolveError>;

    /// Short name of the source, for logs
    fn source_type(&self) -> &'static str;
}
