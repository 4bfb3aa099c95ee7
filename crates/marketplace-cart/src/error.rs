//! Cart error types.

use marketplace_kv::CacheError;
use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// The store was used outside an established scope, or configured wrongly.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The storage backend failed to read or write, or a snapshot failed to encode.
    #[error("Persistence error: {0}")]
    Persistence(#[from] CacheError),

    /// The persisted snapshot could not be decoded.
    #[error("Malformed cart snapshot: {0}")]
    MalformedSnapshot(serde_json::Error),
}

impl CartError {
    /// Classify a failure from reading the stored snapshot.
    ///
    /// Only a decode failure on this path means the snapshot is malformed.
    pub(crate) fn from_snapshot_read(e: CacheError) -> Self {
        match e {
            CacheError::SerializeError(e) => CartError::MalformedSnapshot(e),
            other => CartError::Persistence(other),
        }
    }
}
