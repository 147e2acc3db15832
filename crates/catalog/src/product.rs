use serde::{Deserialize, Serialize};

use pressdesk_core::{ProductId, ValueObject};

/// Read-only snapshot of a catalog product.
///
/// Supplied by the catalog collaborator when a package item is assembled;
/// `base_price` is the list price used to derive a package's original
/// (pre-discount) price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    pub name: String,
    pub base_price: f64,
}

impl ProductRef {
    pub fn new(id: ProductId, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            base_price,
        }
    }
}

impl ValueObject for ProductRef {}
