//! Quote-to-invoice conversion.

use chrono::{DateTime, Duration, Utc};

use pressdesk_core::InvoiceId;

use crate::invoice::{Invoice, InvoiceStatus};
use crate::quote::Quote;

/// Payment terms applied to converted invoices.
const PAYMENT_TERMS_DAYS: i64 = 30;

/// Convert an accepted quote into a draft invoice.
///
/// Line items are deep-copied: the invoice owns fresh values, so later
/// edits to either document cannot affect the other. Totals are inherited
/// verbatim from the quote, not recomputed. The caller supplies the fresh
/// invoice id and number (see [`crate::numbering`]).
pub fn convert_quote_to_invoice(
    quote: &Quote,
    invoice_id: InvoiceId,
    invoice_number: impl Into<String>,
    now: DateTime<Utc>,
) -> Invoice {
    let notes = match quote.notes() {
        Some(original) => format!(
            "Converted from Quote {}. {}",
            quote.quote_number(),
            original
        ),
        None => format!("Converted from Quote {}.", quote.quote_number()),
    };

    Invoice {
        id: invoice_id,
        invoice_number: invoice_number.into(),
        customer: quote.customer().clone(),
        line_items: quote.line_items().to_vec(),
        subtotal: quote.subtotal(),
        tax_rate: quote.tax_rate(),
        tax_amount: quote.tax_amount(),
        total: quote.total(),
        status: InvoiceStatus::Draft,
        created_date: now,
        due_date: now + Duration::days(PAYMENT_TERMS_DAYS),
        paid_date: None,
        notes: Some(notes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressdesk_core::{CustomerId, LineItemId, QuoteId};
    use pressdesk_pricing::LineItem;

    use crate::customer::CustomerRef;
    use crate::quote::QuoteStatus;

    fn test_quote() -> Quote {
        let now = Utc::now();
        let mut quote = Quote::new(
            QuoteId::new(),
            "QT-2026-0007",
            CustomerRef::new(CustomerId::new(), "Avery Tran", "avery@example.com"),
            6.0,
            now,
            now + Duration::days(30),
        );
        quote.add_line_item(LineItem::new(LineItemId::new(), "posters", 2.0, 50.0));
        quote.add_line_item(LineItem::new(LineItemId::new(), "banner", 1.0, 100.0));
        quote.set_status(QuoteStatus::Accepted);
        quote
    }

    #[test]
    fn totals_are_inherited_not_recomputed() {
        let quote = test_quote();
        let invoice =
            convert_quote_to_invoice(&quote, InvoiceId::new(), "INV-2026-0001", Utc::now());
        assert_eq!(invoice.subtotal(), quote.subtotal());
        assert_eq!(invoice.tax_rate(), quote.tax_rate());
        assert_eq!(invoice.tax_amount(), quote.tax_amount());
        assert_eq!(invoice.total(), quote.total());
    }

    #[test]
    fn line_items_are_value_equal_but_independent() {
        let quote = test_quote();
        let mut invoice =
            convert_quote_to_invoice(&quote, InvoiceId::new(), "INV-2026-0001", Utc::now());
        assert_eq!(invoice.line_items(), quote.line_items());

        // Mutating the invoice copy must leave the quote untouched.
        let line_id = invoice.line_items()[0].id;
        invoice.set_line_quantity(line_id, 99.0);
        assert_eq!(quote.line_items()[0].quantity, 2.0);
        assert_eq!(quote.subtotal(), 200.0);
    }

    #[test]
    fn converted_invoice_is_draft_with_thirty_day_terms() {
        let quote = test_quote();
        let now = Utc::now();
        let invoice = convert_quote_to_invoice(&quote, InvoiceId::new(), "INV-2026-0001", now);
        assert_eq!(invoice.status(), InvoiceStatus::Draft);
        assert_eq!(invoice.created_date(), now);
        assert_eq!(invoice.due_date(), now + Duration::days(30));
        assert_eq!(invoice.paid_date(), None);
    }

    #[test]
    fn note_cites_the_source_quote() {
        let quote = test_quote();
        let invoice =
            convert_quote_to_invoice(&quote, InvoiceId::new(), "INV-2026-0001", Utc::now());
        assert_eq!(invoice.notes(), Some("Converted from Quote QT-2026-0007."));
    }

    #[test]
    fn note_preserves_original_notes() {
        let mut quote = test_quote();
        quote.set_notes(Some("Rush job, deliver Friday.".to_string()));
        let invoice =
            convert_quote_to_invoice(&quote, InvoiceId::new(), "INV-2026-0001", Utc::now());
        assert_eq!(
            invoice.notes(),
            Some("Converted from Quote QT-2026-0007. Rush job, deliver Friday.")
        );
    }
}
