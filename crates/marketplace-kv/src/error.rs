//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using a key-value backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}

impl CacheError {
    /// Whether the error came from decoding a stored value.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::SerializeError(_))
    }
}
