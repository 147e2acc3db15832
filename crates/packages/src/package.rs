use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pressdesk_catalog::ProductRef;
use pressdesk_core::{Entity, PackageId, ProductId};

use crate::composer;

/// One constituent of a package: a catalog product at a quantity, with an
/// optional operator-set sale price per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageItem {
    pub product_id: ProductId,
    /// Catalog snapshot at assembly time (the catalog itself is external).
    pub product: ProductRef,
    pub quantity: f64,
    /// Sale price per unit; `None` until the operator prices the item.
    pub unit_price: Option<f64>,
    pub variant_description: Option<String>,
}

impl PackageItem {
    pub fn new(product: ProductRef, quantity: f64, unit_price: Option<f64>) -> Self {
        Self {
            product_id: product.id,
            product,
            quantity,
            unit_price,
            variant_description: None,
        }
    }
}

/// Sale price of a package: still tracking the item list, or pinned.
///
/// Operators may pin the price after the fact, but item-level edits always
/// retag to `Computed` and discard the pin. The tag makes that discard
/// observable instead of silent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "lowercase")]
pub enum PackagePrice {
    /// `Σ (unit_price ?? 0) * quantity` as of the last item edit.
    Computed(f64),
    /// Operator-pinned value; survives until the next item edit.
    Overridden(f64),
}

impl PackagePrice {
    pub fn effective(&self) -> f64 {
        match *self {
            PackagePrice::Computed(v) | PackagePrice::Overridden(v) => v,
        }
    }

    pub fn is_overridden(&self) -> bool {
        matches!(self, PackagePrice::Overridden(_))
    }
}

/// Sellable bundle of catalog products.
///
/// `original_price` and the computed sale price are functions of the item
/// list at the moment of the last item edit; the composer re-runs on every
/// add/remove/quantity/price change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub(crate) id: PackageId,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) price: PackagePrice,
    pub(crate) original_price: f64,
    pub(crate) items: Vec<PackageItem>,
    pub(crate) is_active: bool,
    pub(crate) created_at: DateTime<Utc>,
}

impl Package {
    pub fn new(id: PackageId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price: PackagePrice::Computed(0.0),
            original_price: 0.0,
            items: Vec::new(),
            is_active: true,
            created_at,
        }
    }

    pub fn id_typed(&self) -> PackageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> PackagePrice {
        self.price
    }

    pub fn original_price(&self) -> f64 {
        self.original_price
    }

    pub fn items(&self) -> &[PackageItem] {
        &self.items
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Pin the sale price to an operator-chosen value. The pin holds until
    /// the next item-level edit recomputes and discards it.
    pub fn override_price(&mut self, value: f64) {
        self.price = PackagePrice::Overridden(value);
    }

    pub fn add_item(&mut self, item: PackageItem) {
        self.items.push(item);
        self.recompose();
    }

    /// Remove every item referencing the product. Returns `true` if any
    /// item was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.recompose();
        }
        removed
    }

    /// Update an item's quantity. Returns `false` if no item matches.
    pub fn set_item_quantity(&mut self, product_id: ProductId, quantity: f64) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.product_id == product_id)
        else {
            return false;
        };
        item.quantity = quantity;
        self.recompose();
        true
    }

    /// Update an item's sale price per unit. Returns `false` if no item
    /// matches.
    pub fn set_item_unit_price(&mut self, product_id: ProductId, unit_price: Option<f64>) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.product_id == product_id)
        else {
            return false;
        };
        item.unit_price = unit_price;
        self.recompose();
        true
    }

    fn recompose(&mut self) {
        let composition = composer::compose(&self.items);
        self.original_price = composition.original_price;
        self.price = PackagePrice::Computed(composition.sale_price);
    }
}

impl Entity for Package {
    type Id = PackageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
