//! Persistent cart state.

use std::sync::Arc;

use marketplace_kv::{Cache, CacheError, KvStore};
use tokio::sync::{watch, Mutex, OnceCell};

use crate::cart::{CartCollection, NewLineItem};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;

/// The cart state manager.
///
/// Holds the current [`CartCollection`], mirrors it to a key-value backend
/// under a fixed key, and publishes every new collection to observers.
///
/// Each mutation runs read-modify-write-persist under a single writer lock:
/// the new collection is computed from the latest committed one, written to
/// storage, and only then published. A failed write leaves the in-memory
/// state untouched.
///
/// The write and the publish run on a spawned task that owns the writer
/// lock, so a caller that drops a mutation mid-write does not leave memory
/// behind storage: the task still publishes once the write settles, and the
/// next mutation waits for it. Mutations must be called within a Tokio
/// runtime.
///
/// # Example
///
/// ```rust,ignore
/// let store = CartStore::open(Arc::new(MemoryStore::new()), &CartConfig::default()).await?;
///
/// store.add_to_cart(NewLineItem::new("p1", "Shirt", "https://img/p1", 10.0)).await?;
/// store.increment(&"p1".into()).await?;
/// assert_eq!(store.products().item_count(), 2);
/// ```
pub struct CartStore {
    cache: Cache,
    key: String,
    hydrated: OnceCell<()>,
    writer: Arc<Mutex<()>>,
    products: Arc<watch::Sender<Arc<CartCollection>>>,
}

impl CartStore {
    /// Create a store without reading storage yet.
    ///
    /// The collection stays empty until [`hydrate`](Self::hydrate) runs,
    /// which the first mutation also triggers.
    pub fn new(store: Arc<dyn KvStore>, config: &CartConfig) -> Self {
        let (products, _) = watch::channel(Arc::new(CartCollection::new()));
        Self {
            cache: Cache::new(store),
            key: config.storage_key(),
            hydrated: OnceCell::new(),
            writer: Arc::new(Mutex::new(())),
            products: Arc::new(products),
        }
    }

    /// Create a store and hydrate it from storage.
    pub async fn open(store: Arc<dyn KvStore>, config: &CartConfig) -> Result<Self, CartError> {
        let cart = Self::new(store, config);
        cart.hydrate().await?;
        Ok(cart)
    }

    /// Open the configured backend and hydrate from it.
    pub async fn from_config(config: &CartConfig) -> Result<Self, CartError> {
        let store = config.storage.open().await?;
        Self::open(store, config).await
    }

    /// Load the persisted snapshot, once.
    ///
    /// The first successful call adopts the stored collection (if any) as
    /// the current state; later calls return immediately without touching
    /// storage. A failed attempt can be retried.
    pub async fn hydrate(&self) -> Result<(), CartError> {
        self.hydrated
            .get_or_try_init(|| async move {
                let stored: Option<CartCollection> = self
                    .cache
                    .get(&self.key)
                    .await
                    .map_err(CartError::from_snapshot_read)?;
                match stored {
                    Some(collection) => {
                        tracing::info!(
                            key = %self.key,
                            items = collection.len(),
                            "hydrated cart from storage"
                        );
                        self.products.send_replace(Arc::new(collection));
                    }
                    None => {
                        tracing::info!(key = %self.key, "no stored cart, starting empty");
                    }
                }
                Ok::<(), CartError>(())
            })
            .await?;
        Ok(())
    }

    /// Whether hydration has completed.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated.initialized()
    }

    /// Current cart contents.
    pub fn products(&self) -> Arc<CartCollection> {
        self.products.borrow().clone()
    }

    /// Watch the cart; the receiver sees every published collection.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CartCollection>> {
        self.products.subscribe()
    }

    /// Storage key the snapshot lives under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Add a product, or raise its quantity if already in the cart.
    pub async fn add_to_cart(&self, candidate: NewLineItem) -> Result<(), CartError> {
        let id = candidate.id.clone();
        self.commit(&id, "add_to_cart", |current| {
            Some(current.with_added(candidate))
        })
        .await
    }

    /// Raise the quantity of `id` by one.
    ///
    /// An unknown id still persists and republishes the unchanged cart.
    pub async fn increment(&self, id: &ProductId) -> Result<(), CartError> {
        self.commit(id, "increment", |current| Some(current.with_incremented(id)))
            .await
    }

    /// Lower the quantity of `id` by one, removing it at quantity 1.
    ///
    /// An unknown id is a no-op: nothing is written or published.
    pub async fn decrement(&self, id: &ProductId) -> Result<(), CartError> {
        self.commit(id, "decrement", |current| current.with_decremented(id))
            .await
    }

    async fn commit<F>(&self, id: &ProductId, op: &'static str, derive: F) -> Result<(), CartError>
    where
        F: FnOnce(&CartCollection) -> Option<CartCollection>,
    {
        let guard = Arc::clone(&self.writer).lock_owned().await;
        self.hydrate().await?;

        let current = self.products();
        let Some(next) = derive(&*current) else {
            tracing::debug!(op, product = %id, "product not in cart, nothing to do");
            return Ok(());
        };

        let cache = self.cache.clone();
        let key = self.key.clone();
        let products = Arc::clone(&self.products);
        let product = id.clone();

        // Owns the writer lock until the snapshot is both persisted and published.
        let persist = tokio::spawn(async move {
            let _guard = guard;
            if let Err(e) = cache.set(&key, &next).await {
                tracing::warn!(op, product = %product, error = %e, "failed to persist cart");
                return Err(CartError::from(e));
            }

            tracing::debug!(op, product = %product, items = next.len(), "cart updated");
            products.send_replace(Arc::new(next));
            Ok(())
        });

        persist.await.map_err(|e| {
            CartError::Persistence(CacheError::StoreError(format!("persist task failed: {}", e)))
        })?
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("hydrated", &self.is_hydrated())
            .field("products", &self.products())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_kv::MemoryStore;

    fn shirt() -> NewLineItem {
        NewLineItem::new("p1", "Shirt", "u", 10.0)
    }

    #[tokio::test]
    async fn test_new_does_not_touch_storage() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);

        let cart = CartStore::new(store, &CartConfig::default());
        assert!(!cart.is_hydrated());
        assert!(cart.products().is_empty());
    }

    #[tokio::test]
    async fn test_mutation_hydrates_first() {
        let seeded = r#"[{"id":"p1","title":"Shirt","imageUrl":"u","price":10,"quantity":1}]"#;
        let store = Arc::new(MemoryStore::new().with_entry("@GoMarketplace:products", seeded));

        let cart = CartStore::new(store, &CartConfig::default());
        cart.increment(&"p1".into()).await.unwrap();

        assert!(cart.is_hydrated());
        assert_eq!(cart.products().get(&"p1".into()).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_each_publish_is_a_new_snapshot() {
        let cart = CartStore::open(Arc::new(MemoryStore::new()), &CartConfig::default())
            .await
            .unwrap();

        let before = cart.products();
        cart.increment(&"missing".into()).await.unwrap();
        let after = cart.products();

        assert_eq!(*before, *after);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn test_storage_key_from_config() {
        let config = CartConfig {
            namespace: "@Shop".to_string(),
            ..CartConfig::default()
        };
        let cart = CartStore::new(Arc::new(MemoryStore::new()), &config);
        assert_eq!(cart.storage_key(), "@Shop:products");
    }

    #[tokio::test]
    async fn test_add_then_debug() {
        let cart = CartStore::open(Arc::new(MemoryStore::new()), &CartConfig::default())
            .await
            .unwrap();
        cart.add_to_cart(shirt()).await.unwrap();

        let debug = format!("{:?}", cart);
        assert!(debug.contains("@GoMarketplace:products"));
        assert!(debug.contains("Shirt"));
    }
}
