//! dnsinv-resolver: TXT record retrieval
//!
//! Provides the [`TxtSource`] trait with DNS and file implementations, plus the
//! normalization and ordering applied before records reach the decoder.

pub mod error;
pub mod file;
pub mod hickory;
pub mod normalize;
pub mod traits;

use tracing::{info, instrument};

pub use error::ResolveError;
pub use file::FileTxtSource;
pub use hickory::{DEFAULT_TIMEOUT, HickoryTxtSource, validate_domain};
pub use normalize::{normalize_txt, prepare_records, sort_records};
pub use traits::TxtSource;

/// Fetch, normalize and sort the TXT records for `domain`
///
/// # Errors
/// Propagates lookup errors from `source`, and returns
/// [`ResolveError::NoRecords`] when the answer is empty.
#[instrument(skip(source), fields(source = source.source_type()))]
pub async fn fetch_records(
    source: &dyn TxtSource,
    domain: &str,
) -> Result<Vec<String>, ResolveError> {
    let raw = source.lookup(domain).await?;
    if raw.is_empty() {
        return Err(ResolveError::NoRecords(domain.to_string()));
    }

    let records = prepare_records(&raw);
    info!(count = records.len(), "fetched TXT records");
    Ok(records)
}
