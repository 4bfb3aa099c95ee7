//! The ordered cart collection and its mutation derivations.
//!
//! Every derivation builds a new collection and leaves `self` untouched, so a
//! published snapshot is never modified after the fact.

use crate::cart::{LineItem, NewLineItem};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Ordered line items, unique by product id.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CartCollection {
    items: Vec<LineItem>,
}

impl CartCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection with `candidate` added.
    ///
    /// A new product is appended with quantity 1. A product already present
    /// has its quantity raised by one; its stored title, image and price are
    /// kept as they are.
    pub fn with_added(&self, candidate: NewLineItem) -> Self {
        if self.contains(&candidate.id) {
            return self.with_incremented(&candidate.id);
        }

        let mut items = self.items.clone();
        items.push(candidate.into_line_item(1));
        Self { items }
    }

    /// Collection with the quantity of `id` raised by one.
    ///
    /// An unknown id yields an equal collection.
    pub fn with_incremented(&self, id: &ProductId) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                if &item.id == id {
                    item.incremented()
                } else {
                    item.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// Collection with the quantity of `id` lowered by one.
    ///
    /// An item at quantity 1 is removed. Returns `None` when `id` is not in
    /// the cart.
    pub fn with_decremented(&self, id: &ProductId) -> Option<Self> {
        let target = self.get(id)?;

        let items = if target.quantity <= 1 {
            self.items
                .iter()
                .filter(|item| &item.id != id)
                .cloned()
                .collect()
        } else {
            self.items
                .iter()
                .map(|item| {
                    if &item.id == id {
                        item.decremented()
                    } else {
                        item.clone()
                    }
                })
                .collect()
        };
        Some(Self { items })
    }

    /// Get an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Whether a product is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

impl From<Vec<LineItem>> for CartCollection {
    fn from(items: Vec<LineItem>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a CartCollection {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
