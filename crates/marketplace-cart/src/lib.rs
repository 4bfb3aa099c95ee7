//! Persistent shopping-cart state for the marketplace client.
//!
//! This crate keeps an ordered list of cart line items in memory and mirrors
//! it to a local key-value store so the cart survives restarts:
//!
//! - **Cart**: `LineItem`, `NewLineItem` and the ordered `CartCollection`
//! - **Store**: `CartStore`, which hydrates once, persists every change, and
//!   publishes each new collection to observers
//! - **Provider**: `CartProvider`, the explicit scope consumers resolve the
//!   store through
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_cart::prelude::*;
//!
//! let config = CartConfig::load("cart.toml")?;
//! let provider = CartProvider::with_store(Arc::new(CartStore::from_config(&config).await?));
//!
//! // Anywhere the provider is reachable
//! let cart = provider.use_cart()?;
//! cart.add_to_cart(NewLineItem::new("p1", "Shirt", "https://img/p1", 10.0)).await?;
//! cart.decrement(&"p1".into()).await?;
//! assert!(cart.products().is_empty());
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ids;
pub mod provider;
pub mod store;

pub use cart::{CartCollection, LineItem, NewLineItem};
pub use config::CartConfig;
pub use error::CartError;
pub use ids::ProductId;
pub use provider::CartProvider;
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{CartCollection, LineItem, NewLineItem};
    pub use crate::config::CartConfig;
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::provider::CartProvider;
    pub use crate::store::CartStore;
}
