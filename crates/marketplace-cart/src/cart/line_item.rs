//! Line item types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product entry in the cart.
///
/// `title`, `image_url` and `price` are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Product image URL.
    #[serde(rename = "imageUrl", alias = "image_url")]
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Quantity, at least 1 while the item is in the cart.
    pub quantity: u32,
}

impl LineItem {
    /// Line total (`price * quantity`).
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Copy of this item with quantity raised by one.
    pub(crate) fn incremented(&self) -> Self {
        Self {
            quantity: self.quantity.saturating_add(1),
            ..self.clone()
        }
    }

    /// Copy of this item with quantity lowered by one.
    pub(crate) fn decremented(&self) -> Self {
        Self {
            quantity: self.quantity.saturating_sub(1),
            ..self.clone()
        }
    }
}

/// A product about to be added to the cart: a [`LineItem`] without quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Product image URL.
    #[serde(rename = "imageUrl", alias = "image_url")]
    pub image_url: String,
    /// Unit price.
    pub price: f64,
}

impl NewLineItem {
    /// Create a new candidate.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turn the candidate into a line item with the given quantity.
    pub fn into_line_item(self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> NewLineItem {
        NewLineItem::new("p1", "Shirt", "u", 10.0)
    }

    #[test]
    fn test_into_line_item() {
        let item = shirt().into_line_item(1);
        assert_eq!(item.id, ProductId::new("p1"));
        assert_eq!(item.title, "Shirt");
        assert_eq!(item.image_url, "u");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_record_format() {
        let json = serde_json::to_value(shirt().into_line_item(2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "p1",
                "title": "Shirt",
                "imageUrl": "u",
                "price": 10.0,
                "quantity": 2
            })
        );
    }

    #[test]
    fn test_legacy_image_field_accepted() {
        let item: LineItem = serde_json::from_str(
            r#"{"id":"p1","title":"Shirt","image_url":"u","price":10,"quantity":3}"#,
        )
        .unwrap();
        assert_eq!(item.image_url, "u");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_quantity_saturates() {
        let item = shirt().into_line_item(u32::MAX);
        assert_eq!(item.incremented().quantity, u32::MAX);

        let item = shirt().into_line_item(0);
        assert_eq!(item.decremented().quantity, 0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(shirt().into_line_item(3).line_total(), 30.0);
    }
}
