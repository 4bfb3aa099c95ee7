//! Shopping cart module.
//!
//! Contains the line item types and the ordered collection that holds them.

mod collection;
mod line_item;

pub use collection::CartCollection;
pub use line_item::{LineItem, NewLineItem};
