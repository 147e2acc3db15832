use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pressdesk_core::{Entity, LineItemId, QuoteId};
use pressdesk_pricing::{calculator, LineItem};

use crate::customer::CustomerRef;

/// Quote status lifecycle.
///
/// No transition graph is enforced on the record: any status may be set
/// directly by the caller. Strict workflows go through
/// [`crate::transitions::validate_quote_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
}

/// Pre-sale commercial document: priced line items plus tax and totals.
///
/// Totals invariants, re-established after every line or tax-rate edit:
/// `subtotal == Σ line_items[i].total`,
/// `tax_amount == subtotal * tax_rate / 100`,
/// `total == subtotal + tax_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub(crate) id: QuoteId,
    pub(crate) quote_number: String,
    pub(crate) customer: CustomerRef,
    pub(crate) line_items: Vec<LineItem>,
    pub(crate) subtotal: f64,
    pub(crate) tax_rate: f64,
    pub(crate) tax_amount: f64,
    pub(crate) total: f64,
    pub(crate) status: QuoteStatus,
    pub(crate) created_date: DateTime<Utc>,
    pub(crate) valid_until: DateTime<Utc>,
    pub(crate) notes: Option<String>,
}

impl Quote {
    pub fn new(
        id: QuoteId,
        quote_number: impl Into<String>,
        customer: CustomerRef,
        tax_rate: f64,
        created_date: DateTime<Utc>,
        valid_until: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            quote_number: quote_number.into(),
            customer,
            line_items: Vec::new(),
            subtotal: 0.0,
            tax_rate,
            tax_amount: 0.0,
            total: 0.0,
            status: QuoteStatus::Draft,
            created_date,
            valid_until,
            notes: None,
        }
    }

    pub fn id_typed(&self) -> QuoteId {
        self.id
    }

    pub fn quote_number(&self) -> &str {
        &self.quote_number
    }

    pub fn customer(&self) -> &CustomerRef {
        &self.customer
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn tax_amount(&self) -> f64 {
        self.tax_amount
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Set any status directly (permissive core; business-transition
    /// validity is the calling workflow's concern).
    pub fn set_status(&mut self, status: QuoteStatus) {
        self.status = status;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub fn add_line_item(&mut self, item: LineItem) {
        self.line_items.push(item);
        self.recalculate();
    }

    /// Remove a line by id. Returns `true` if a line was removed.
    pub fn remove_line_item(&mut self, line_id: LineItemId) -> bool {
        let before = self.line_items.len();
        self.line_items.retain(|item| item.id != line_id);
        let removed = self.line_items.len() != before;
        if removed {
            self.recalculate();
        }
        removed
    }

    /// Update a line's quantity, keeping its total and the document totals
    /// in sync. Returns `false` if no line has the given id.
    pub fn set_line_quantity(&mut self, line_id: LineItemId, quantity: f64) -> bool {
        let Some(item) = self.line_items.iter_mut().find(|item| item.id == line_id) else {
            return false;
        };
        item.set_quantity(quantity);
        self.recalculate();
        true
    }

    /// Update a line's unit price, keeping its total and the document
    /// totals in sync. Returns `false` if no line has the given id.
    pub fn set_line_unit_price(&mut self, line_id: LineItemId, unit_price: f64) -> bool {
        let Some(item) = self.line_items.iter_mut().find(|item| item.id == line_id) else {
            return false;
        };
        item.set_unit_price(unit_price);
        self.recalculate();
        true
    }

    /// Replace the whole line list (form submission shape).
    pub fn replace_line_items(&mut self, items: Vec<LineItem>) {
        self.line_items = items;
        self.recalculate();
    }

    pub fn set_tax_rate(&mut self, tax_rate: f64) {
        self.tax_rate = tax_rate;
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.subtotal = calculator::subtotal(&self.line_items);
        self.tax_amount = calculator::tax_amount(self.subtotal, self.tax_rate);
        self.total = calculator::total(self.subtotal, self.tax_amount);
    }
}

impl Entity for Quote {
    type Id = QuoteId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
