//! Back-office service: workflow orchestration over the document core.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use pressdesk_core::{
    DepartmentId, DomainError, DomainResult, InvoiceId, LineItemId, PackageId, ProductId, QuoteId,
};
use pressdesk_documents::{
    convert_quote_to_invoice, transitions, CustomerRef, DocumentKind, DocumentSequence, Invoice,
    InvoiceStatus, Quote, QuoteStatus,
};
use pressdesk_orders::{convert_invoice_to_orders, ProductionOrder};
use pressdesk_packages::{Package, PackageItem};
use pressdesk_pricing::LineItem;

use crate::memory::{InMemoryStore, SnapshotStore};

/// Quote validity window applied at creation.
const QUOTE_VALIDITY_DAYS: i64 = 30;
/// Payment terms for directly created invoices.
const PAYMENT_TERMS_DAYS: i64 = 30;

/// The administrative back office: owns the document stores and the number
/// sequence, and routes every workflow through the pure domain crates.
///
/// All operations return owned snapshots; records are permissive, the
/// service is strict (status changes are transition-validated here).
#[derive(Debug, Default)]
pub struct BackOffice {
    quotes: InMemoryStore<QuoteId, Quote>,
    invoices: InMemoryStore<InvoiceId, Invoice>,
    packages: InMemoryStore<PackageId, Package>,
    orders: InMemoryStore<String, ProductionOrder>,
    numbers: Mutex<DocumentSequence>,
    claimed_numbers: Mutex<HashSet<String>>,
}

impl BackOffice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue and claim the next document number. A duplicate claim is a
    /// retryable conflict: regenerate and try again.
    fn next_number(&self, kind: DocumentKind) -> DomainResult<String> {
        let number = self
            .numbers
            .lock()
            .map_err(|_| DomainError::conflict("number sequence lock poisoned"))?
            .next(kind, Utc::now());
        self.claim_number(&number)?;
        Ok(number)
    }

    fn claim_number(&self, number: &str) -> DomainResult<()> {
        let mut claimed = self
            .claimed_numbers
            .lock()
            .map_err(|_| DomainError::conflict("number index lock poisoned"))?;
        if !claimed.insert(number.to_string()) {
            return Err(DomainError::conflict(format!(
                "document number {number} already claimed"
            )));
        }
        Ok(())
    }

    fn update_quote<F>(&self, id: QuoteId, mutate: F) -> DomainResult<Quote>
    where
        F: FnOnce(&mut Quote) -> DomainResult<()>,
    {
        let mut quote = self.quotes.get(&id).ok_or(DomainError::NotFound)?;
        mutate(&mut quote)?;
        self.quotes.replace(&id, quote)
    }

    fn update_invoice<F>(&self, id: InvoiceId, mutate: F) -> DomainResult<Invoice>
    where
        F: FnOnce(&mut Invoice) -> DomainResult<()>,
    {
        let mut invoice = self.invoices.get(&id).ok_or(DomainError::NotFound)?;
        mutate(&mut invoice)?;
        self.invoices.replace(&id, invoice)
    }

    fn update_package<F>(&self, id: PackageId, mutate: F) -> DomainResult<Package>
    where
        F: FnOnce(&mut Package) -> DomainResult<()>,
    {
        let mut package = self.packages.get(&id).ok_or(DomainError::NotFound)?;
        mutate(&mut package)?;
        self.packages.replace(&id, package)
    }

    // ----- quotes -----

    pub fn create_quote(&self, customer: CustomerRef, tax_rate: f64) -> DomainResult<Quote> {
        let now = Utc::now();
        let number = self.next_number(DocumentKind::Quote)?;
        let quote = Quote::new(
            QuoteId::new(),
            number,
            customer,
            tax_rate,
            now,
            now + Duration::days(QUOTE_VALIDITY_DAYS),
        );
        info!(quote_number = %quote.quote_number(), "quote created");
        self.quotes.insert(quote.id_typed(), quote.clone())?;
        Ok(quote)
    }

    pub fn quote(&self, id: QuoteId) -> DomainResult<Quote> {
        self.quotes.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list_quotes(&self) -> Vec<Quote> {
        self.quotes.list()
    }

    pub fn add_quote_line(&self, id: QuoteId, item: LineItem) -> DomainResult<Quote> {
        self.update_quote(id, |quote| {
            quote.add_line_item(item);
            Ok(())
        })
    }

    pub fn remove_quote_line(&self, id: QuoteId, line_id: LineItemId) -> DomainResult<Quote> {
        self.update_quote(id, |quote| {
            if quote.remove_line_item(line_id) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    pub fn set_quote_line_quantity(
        &self,
        id: QuoteId,
        line_id: LineItemId,
        quantity: f64,
    ) -> DomainResult<Quote> {
        self.update_quote(id, |quote| {
            if quote.set_line_quantity(line_id, quantity) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    pub fn set_quote_line_unit_price(
        &self,
        id: QuoteId,
        line_id: LineItemId,
        unit_price: f64,
    ) -> DomainResult<Quote> {
        self.update_quote(id, |quote| {
            if quote.set_line_unit_price(line_id, unit_price) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    pub fn set_quote_tax_rate(&self, id: QuoteId, tax_rate: f64) -> DomainResult<Quote> {
        self.update_quote(id, |quote| {
            quote.set_tax_rate(tax_rate);
            Ok(())
        })
    }

    pub fn set_quote_notes(&self, id: QuoteId, notes: Option<String>) -> DomainResult<Quote> {
        self.update_quote(id, |quote| {
            quote.set_notes(notes);
            Ok(())
        })
    }

    /// Transition-validated status change (strict service over the
    /// permissive record).
    pub fn transition_quote(&self, id: QuoteId, to: QuoteStatus) -> DomainResult<Quote> {
        let quote = self.update_quote(id, |quote| {
            transitions::validate_quote_transition(quote.status(), to)?;
            quote.set_status(to);
            Ok(())
        })?;
        debug!(quote_number = %quote.quote_number(), status = ?to, "quote status changed");
        Ok(quote)
    }

    pub fn delete_quote(&self, id: QuoteId) -> DomainResult<()> {
        self.quotes.remove(&id).ok_or(DomainError::NotFound)?;
        Ok(())
    }

    /// Accept a sent quote and raise the draft invoice from it.
    pub fn accept_quote(&self, id: QuoteId) -> DomainResult<Invoice> {
        let quote = self.transition_quote(id, QuoteStatus::Accepted)?;
        let invoice_number = self.next_number(DocumentKind::Invoice)?;
        let invoice =
            convert_quote_to_invoice(&quote, InvoiceId::new(), invoice_number, Utc::now());
        info!(
            quote_number = %quote.quote_number(),
            invoice_number = %invoice.invoice_number(),
            total = invoice.total(),
            "quote accepted, invoice raised"
        );
        self.invoices.insert(invoice.id_typed(), invoice.clone())?;
        Ok(invoice)
    }

    // ----- invoices -----

    pub fn create_invoice(&self, customer: CustomerRef, tax_rate: f64) -> DomainResult<Invoice> {
        let now = Utc::now();
        let number = self.next_number(DocumentKind::Invoice)?;
        let invoice = Invoice::new(
            InvoiceId::new(),
            number,
            customer,
            tax_rate,
            now,
            now + Duration::days(PAYMENT_TERMS_DAYS),
        );
        info!(invoice_number = %invoice.invoice_number(), "invoice created");
        self.invoices.insert(invoice.id_typed(), invoice.clone())?;
        Ok(invoice)
    }

    pub fn invoice(&self, id: InvoiceId) -> DomainResult<Invoice> {
        self.invoices.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list_invoices(&self) -> Vec<Invoice> {
        self.invoices.list()
    }

    pub fn add_invoice_line(&self, id: InvoiceId, item: LineItem) -> DomainResult<Invoice> {
        self.update_invoice(id, |invoice| {
            invoice.add_line_item(item);
            Ok(())
        })
    }

    pub fn remove_invoice_line(&self, id: InvoiceId, line_id: LineItemId) -> DomainResult<Invoice> {
        self.update_invoice(id, |invoice| {
            if invoice.remove_line_item(line_id) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    pub fn set_invoice_line_quantity(
        &self,
        id: InvoiceId,
        line_id: LineItemId,
        quantity: f64,
    ) -> DomainResult<Invoice> {
        self.update_invoice(id, |invoice| {
            if invoice.set_line_quantity(line_id, quantity) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    pub fn set_invoice_line_unit_price(
        &self,
        id: InvoiceId,
        line_id: LineItemId,
        unit_price: f64,
    ) -> DomainResult<Invoice> {
        self.update_invoice(id, |invoice| {
            if invoice.set_line_unit_price(line_id, unit_price) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    pub fn set_invoice_tax_rate(&self, id: InvoiceId, tax_rate: f64) -> DomainResult<Invoice> {
        self.update_invoice(id, |invoice| {
            invoice.set_tax_rate(tax_rate);
            Ok(())
        })
    }

    /// Transition-validated status change.
    pub fn transition_invoice(&self, id: InvoiceId, to: InvoiceStatus) -> DomainResult<Invoice> {
        let invoice = self.update_invoice(id, |invoice| {
            transitions::validate_invoice_transition(invoice.status(), to)?;
            if to == InvoiceStatus::Paid {
                invoice.mark_paid(Utc::now());
            } else {
                invoice.set_status(to);
            }
            Ok(())
        })?;
        debug!(invoice_number = %invoice.invoice_number(), status = ?to, "invoice status changed");
        Ok(invoice)
    }

    /// Record full payment: transition to Paid and stamp `paid_date`.
    pub fn record_payment(&self, id: InvoiceId) -> DomainResult<Invoice> {
        let invoice = self.transition_invoice(id, InvoiceStatus::Paid)?;
        info!(invoice_number = %invoice.invoice_number(), total = invoice.total(), "invoice paid");
        Ok(invoice)
    }

    pub fn delete_invoice(&self, id: InvoiceId) -> DomainResult<()> {
        self.invoices.remove(&id).ok_or(DomainError::NotFound)?;
        Ok(())
    }

    /// Split an invoice into production-order drafts and persist them.
    ///
    /// No payment-state precondition: ordering between payment and release
    /// belongs to the calling workflow. Releasing the same invoice twice
    /// collides on order numbers and surfaces as a conflict.
    pub fn release_to_production(
        &self,
        id: InvoiceId,
        default_department: &DepartmentId,
    ) -> DomainResult<Vec<ProductionOrder>> {
        let invoice = self.invoice(id)?;
        let orders = convert_invoice_to_orders(&invoice, default_department, Utc::now());

        for order in &orders {
            self.orders.insert(order.order_number.clone(), order.clone())?;
        }

        info!(
            invoice_number = %invoice.invoice_number(),
            order_count = orders.len(),
            group_id = orders[0].group_id.as_deref().unwrap_or("-"),
            "invoice released to production"
        );
        Ok(orders)
    }

    // ----- production orders (read-only: drafts are handed off) -----

    pub fn order(&self, order_number: &str) -> DomainResult<ProductionOrder> {
        self.orders
            .get(&order_number.to_string())
            .ok_or(DomainError::NotFound)
    }

    pub fn list_orders(&self) -> Vec<ProductionOrder> {
        self.orders.list()
    }

    pub fn orders_in_group(&self, group_id: &str) -> Vec<ProductionOrder> {
        self.orders
            .list()
            .into_iter()
            .filter(|order| order.group_id.as_deref() == Some(group_id))
            .collect()
    }

    // ----- packages -----

    pub fn create_package(&self, name: impl Into<String>) -> DomainResult<Package> {
        let package = Package::new(PackageId::new(), name, Utc::now());
        info!(package = %package.name(), "package created");
        self.packages.insert(package.id_typed(), package.clone())?;
        Ok(package)
    }

    pub fn package(&self, id: PackageId) -> DomainResult<Package> {
        self.packages.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list_packages(&self) -> Vec<Package> {
        self.packages.list()
    }

    pub fn add_package_item(&self, id: PackageId, item: PackageItem) -> DomainResult<Package> {
        self.update_package(id, |package| {
            package.add_item(item);
            Ok(())
        })
    }

    pub fn remove_package_item(&self, id: PackageId, product_id: ProductId) -> DomainResult<Package> {
        self.update_package(id, |package| {
            if package.remove_item(product_id) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    pub fn set_package_item_quantity(
        &self,
        id: PackageId,
        product_id: ProductId,
        quantity: f64,
    ) -> DomainResult<Package> {
        self.update_package(id, |package| {
            if package.set_item_quantity(product_id, quantity) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    pub fn set_package_item_unit_price(
        &self,
        id: PackageId,
        product_id: ProductId,
        unit_price: Option<f64>,
    ) -> DomainResult<Package> {
        self.update_package(id, |package| {
            if package.set_item_unit_price(product_id, unit_price) {
                Ok(())
            } else {
                Err(DomainError::not_found())
            }
        })
    }

    /// Pin the package sale price (held until the next item edit).
    pub fn override_package_price(&self, id: PackageId, value: f64) -> DomainResult<Package> {
        let package = self.update_package(id, |package| {
            package.override_price(value);
            Ok(())
        })?;
        debug!(package = %package.name(), value, "package price overridden");
        Ok(package)
    }

    pub fn set_package_active(&self, id: PackageId, is_active: bool) -> DomainResult<Package> {
        self.update_package(id, |package| {
            package.set_active(is_active);
            Ok(())
        })
    }

    pub fn delete_package(&self, id: PackageId) -> DomainResult<()> {
        self.packages.remove(&id).ok_or(DomainError::NotFound)?;
        Ok(())
    }
}
