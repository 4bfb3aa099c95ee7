//! Key-Value store wrapper with automatic serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::KvStore;
use crate::CacheError;

/// Type-safe cache over any [`KvStore`] backend.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl Cache {
    /// Wrap a backend.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::new(Arc::new(MemoryStore::new()));
    /// ```
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let products: Option<Vec<LineItem>> = cache.get("@GoMarketplace:products").await?;
    /// ```
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key).await? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("@GoMarketplace:products", &products).await?;
    /// ```
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes).await
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("@GoMarketplace", "products");
/// // Returns "@GoMarketplace:products"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        count: u32,
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key!("@GoMarketplace", "products"), "@GoMarketplace:products");
        assert_eq!(cache_key!("cart", "user", 42), "cart:user:42");
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));
        let entries = vec![Entry {
            id: "p1".to_string(),
            count: 2,
        }];

        cache.set("k", &entries).await.unwrap();
        let loaded: Option<Vec<Entry>> = cache.get("k").await.unwrap();
        assert_eq!(loaded, Some(entries));
    }

    #[tokio::test]
    async fn test_absent_key() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));
        let loaded: Option<Vec<Entry>> = cache.get("k").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_malformed_value_is_decode_error() {
        let store = MemoryStore::new().with_entry("k", "{not json");
        let cache = Cache::new(Arc::new(store));

        let err = cache.get::<Vec<Entry>>("k").await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_backend_failure_is_not_decode_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let cache = Cache::new(store);

        let err = cache.set("k", &1u32).await.unwrap_err();
        assert!(matches!(err, CacheError::StoreError(_)));
    }
}
