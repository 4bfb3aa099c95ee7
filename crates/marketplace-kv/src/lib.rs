//! Async key-value persistence for the marketplace client.
//!
//! Provides a small backend trait, an in-memory and a file-backed
//! implementation, and a typed wrapper with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_kv::{cache_key, Cache, FileStore};
//! use std::sync::Arc;
//!
//! let cache = Cache::new(Arc::new(FileStore::open("./data").await?));
//! let key = cache_key!("@GoMarketplace", "products");
//!
//! // Store a value
//! cache.set(&key, &products).await?;
//!
//! // Retrieve a value
//! let products: Option<Vec<LineItem>> = cache.get(&key).await?;
//! ```

mod config;
mod error;
mod file;
mod kv;
mod store;

pub use config::StorageConfig;
pub use error::CacheError;
pub use file::{FileStore, MAX_KEY_LEN};
pub use kv::Cache;
pub use store::{KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, Cache, CacheError, FileStore, KvStore, MemoryStore, StorageConfig};
}
