//! Error types for dnsinv-inventory

use thiserror::Error;

/// A problem found while decoding a single TXT record
///
/// Issues never stop assembly on their own: the offending item is skipped and
/// the rest of the record is kept. Strict mode turns the first one into an
/// [`InventoryError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeIssue {
    /// `;`-separated segment without a `=`
    #[error("segment `{0}` is not a key=value pair")]
    MalformedSegment(String),

    /// `,`-separated variable without a `:`
    #[error("variable `{0}` is not a name:value pair")]
    MalformedVariable(String),

    /// Group name that collides with the reserved `_meta` key
    #[error("group name `{0}` is reserved")]
    ReservedName(String),
}

/// Errors that can occur while building an inventory
#[derive(Error, Debug, Clone)]
pub enum InventoryError {
    /// A record carried a decode issue and strict mode was enabled
    #[error("malformed record `{record}`: {issue}")]
    Malformed {
        /// Normalized TXT record text
        record: String,
        /// First issue found in the record
        #[source]
        issue: DecodeIssue,
    },
}

impl InventoryError {
    /// Raw record text the error refers to
    #[must_use]
    pub fn record(&self) -> &str {
        match self {
            InventoryError::Malformed { record, .. } => record,
        }
    }
}
