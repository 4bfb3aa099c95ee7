//! Explicit scope for the application's single cart store.

use std::sync::{Arc, OnceLock};

use crate::error::CartError;
use crate::store::CartStore;

/// Holds the one [`CartStore`] consumers resolve through.
///
/// The hosting application builds one provider at startup, establishes the
/// store in it, and hands the provider to whatever needs the cart. Resolving
/// from a provider with no store is a [`CartError::Configuration`].
#[derive(Debug, Default)]
pub struct CartProvider {
    store: OnceLock<Arc<CartStore>>,
}

impl CartProvider {
    /// Create a provider with no store established.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with `store` already established.
    pub fn with_store(store: Arc<CartStore>) -> Self {
        Self {
            store: OnceLock::from(store),
        }
    }

    /// Establish the store for this scope.
    ///
    /// Only one store may be established per provider.
    pub fn provide(&self, store: Arc<CartStore>) -> Result<(), CartError> {
        self.store.set(store).map_err(|_| {
            CartError::Configuration("a CartStore is already provided in this scope".to_string())
        })
    }

    /// Resolve the established store.
    pub fn use_cart(&self) -> Result<Arc<CartStore>, CartError> {
        self.store.get().cloned().ok_or_else(|| {
            CartError::Configuration("use_cart must be called within a CartProvider".to_string())
        })
    }

    /// Whether a store has been established.
    pub fn is_provided(&self) -> bool {
        self.store.get().is_some()
    }
}
