use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pressdesk_core::{Entity, InvoiceId, LineItemId};
use pressdesk_pricing::{calculator, LineItem};

use crate::customer::CustomerRef;

/// Invoice status lifecycle.
///
/// As with quotes, the record itself accepts any status; strict workflows
/// go through [`crate::transitions::validate_invoice_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

/// Post-sale commercial document. Same totals invariants as a quote;
/// `paid_date` is set only when the invoice is marked paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub(crate) id: InvoiceId,
    pub(crate) invoice_number: String,
    pub(crate) customer: CustomerRef,
    pub(crate) line_items: Vec<LineItem>,
    pub(crate) subtotal: f64,
    pub(crate) tax_rate: f64,
    pub(crate) tax_amount: f64,
    pub(crate) total: f64,
    pub(crate) status: InvoiceStatus,
    pub(crate) created_date: DateTime<Utc>,
    pub(crate) due_date: DateTime<Utc>,
    pub(crate) paid_date: Option<DateTime<Utc>>,
    pub(crate) notes: Option<String>,
}

impl Invoice {
    pub fn new(
        id: InvoiceId,
        invoice_number: impl Into<String>,
        customer: CustomerRef,
        tax_rate: f64,
        created_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            invoice_number: invoice_number.into(),
            customer,
            line_items: Vec::new(),
            subtotal: 0.0,
            tax_rate,
            tax_amount: 0.0,
            total: 0.0,
            status: InvoiceStatus::Draft,
            created_date,
            due_date,
            paid_date: None,
            notes: None,
        }
    }

    pub fn id_typed(&self) -> InvoiceId {
        self.id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
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

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn paid_date(&self) -> Option<DateTime<Utc>> {
        self.paid_date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Set any status directly. Moving *off* Paid clears `paid_date` so the
    /// two fields cannot disagree; use [`Invoice::mark_paid`] to set both.
    pub fn set_status(&mut self, status: InvoiceStatus) {
        self.status = status;
        if status != InvoiceStatus::Paid {
            self.paid_date = None;
        }
    }

    /// Mark the invoice paid at the given instant.
    pub fn mark_paid(&mut self, now: DateTime<Utc>) {
        self.status = InvoiceStatus::Paid;
        self.paid_date = Some(now);
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

    /// Update a line's quantity. Returns `false` if no line has the id.
    pub fn set_line_quantity(&mut self, line_id: LineItemId, quantity: f64) -> bool {
        let Some(item) = self.line_items.iter_mut().find(|item| item.id == line_id) else {
            return false;
        };
        item.set_quantity(quantity);
        self.recalculate();
        true
    }

    /// Update a line's unit price. Returns `false` if no line has the id.
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

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pressdesk_core::CustomerId;

    fn test_customer() -> CustomerRef {
        CustomerRef::new(CustomerId::new(), "Avery Tran", "avery@example.com")
    }

    fn test_invoice() -> Invoice {
        let now = Utc::now();
        Invoice::new(
            InvoiceId::new(),
            "INV-2026-0001",
            test_customer(),
            6.0,
            now,
            now + Duration::days(30),
        )
    }

    #[test]
    fn new_invoice_starts_draft_and_unpaid() {
        let invoice = test_invoice();
        assert_eq!(invoice.status(), InvoiceStatus::Draft);
        assert_eq!(invoice.paid_date(), None);
    }

    #[test]
    fn mark_paid_sets_status_and_paid_date() {
        let mut invoice = test_invoice();
        let paid_at = Utc::now();
        invoice.mark_paid(paid_at);
        assert_eq!(invoice.status(), InvoiceStatus::Paid);
        assert_eq!(invoice.paid_date(), Some(paid_at));
    }

    #[test]
    fn leaving_paid_clears_paid_date() {
        let mut invoice = test_invoice();
        invoice.mark_paid(Utc::now());
        invoice.set_status(InvoiceStatus::Overdue);
        assert_eq!(invoice.paid_date(), None);
    }

    #[test]
    fn totals_follow_line_edits() {
        let mut invoice = test_invoice();
        invoice.add_line_item(LineItem::new(LineItemId::new(), "posters", 2.0, 50.0));
        invoice.add_line_item(LineItem::new(LineItemId::new(), "banner", 1.0, 100.0));
        assert_eq!(invoice.subtotal(), 200.0);
        assert_eq!(invoice.tax_amount(), 12.0);
        assert_eq!(invoice.total(), 212.0);

        invoice.set_line_unit_price(invoice.line_items()[0].id, 60.0);
        assert_eq!(invoice.subtotal(), 220.0);
    }
}
