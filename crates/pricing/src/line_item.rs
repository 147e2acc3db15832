use serde::{Deserialize, Serialize};

use pressdesk_core::{DepartmentId, LineItemId, ProductId};

use crate::calculator;

/// One priced row on a quote or invoice.
///
/// `total` is a stored field, not a derived one: the constructor and the
/// quantity/price mutators keep `total == quantity * unit_price`, and
/// document subtotals sum the stored value. Mutating the public fields
/// directly bypasses that discipline; use the mutators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    /// Weak back-reference to a catalog entry (lookup only, not ownership).
    pub product_id: Option<ProductId>,
    /// Production department this row belongs to, if tagged.
    pub department_id: Option<DepartmentId>,
}

impl LineItem {
    pub fn new(
        id: LineItemId,
        description: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            quantity,
            unit_price,
            total: calculator::line_total(quantity, unit_price),
            product_id: None,
            department_id: None,
        }
    }

    pub fn with_product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Update the quantity and re-derive the stored total.
    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.total = calculator::line_total(self.quantity, self.unit_price);
    }

    /// Update the unit price and re-derive the stored total.
    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
        self.total = calculator::line_total(self.quantity, self.unit_price);
    }
}
