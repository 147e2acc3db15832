//! Optional strict status-transition validation.
//!
//! The document records accept any status directly; workflows that want a
//! real state machine route their changes through these functions instead.

use pressdesk_core::{DomainError, DomainResult};

use crate::invoice::InvoiceStatus;
use crate::quote::QuoteStatus;

/// Allowed quote transitions: Draft → Sent → Accepted | Rejected.
pub fn validate_quote_transition(from: QuoteStatus, to: QuoteStatus) -> DomainResult<()> {
    use QuoteStatus::*;
    let allowed = matches!(
        (from, to),
        (Draft, Sent) | (Sent, Accepted) | (Sent, Rejected)
    );
    if allowed {
        Ok(())
    } else {
        Err(DomainError::invariant(format!(
            "quote cannot move from {from:?} to {to:?}"
        )))
    }
}

/// Allowed invoice transitions: Draft → Sent → Paid | Overdue, and
/// Overdue → Paid (late payment).
pub fn validate_invoice_transition(from: InvoiceStatus, to: InvoiceStatus) -> DomainResult<()> {
    use InvoiceStatus::*;
    let allowed = matches!(
        (from, to),
        (Draft, Sent) | (Sent, Paid) | (Sent, Overdue) | (Overdue, Paid)
    );
    if allowed {
        Ok(())
    } else {
        Err(DomainError::invariant(format!(
            "invoice cannot move from {from:?} to {to:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_happy_path_is_allowed() {
        assert!(validate_quote_transition(QuoteStatus::Draft, QuoteStatus::Sent).is_ok());
        assert!(validate_quote_transition(QuoteStatus::Sent, QuoteStatus::Accepted).is_ok());
        assert!(validate_quote_transition(QuoteStatus::Sent, QuoteStatus::Rejected).is_ok());
    }

    #[test]
    fn quote_cannot_skip_sent() {
        let err =
            validate_quote_transition(QuoteStatus::Draft, QuoteStatus::Accepted).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => assert!(msg.contains("Draft")),
            _ => panic!("Expected InvariantViolation"),
        }
    }

    #[test]
    fn quote_same_status_is_not_a_transition() {
        assert!(validate_quote_transition(QuoteStatus::Sent, QuoteStatus::Sent).is_err());
    }

    #[test]
    fn invoice_happy_paths_are_allowed() {
        assert!(validate_invoice_transition(InvoiceStatus::Draft, InvoiceStatus::Sent).is_ok());
        assert!(validate_invoice_transition(InvoiceStatus::Sent, InvoiceStatus::Paid).is_ok());
        assert!(validate_invoice_transition(InvoiceStatus::Sent, InvoiceStatus::Overdue).is_ok());
        assert!(validate_invoice_transition(InvoiceStatus::Overdue, InvoiceStatus::Paid).is_ok());
    }

    #[test]
    fn invoice_cannot_unpay() {
        assert!(validate_invoice_transition(InvoiceStatus::Paid, InvoiceStatus::Draft).is_err());
        assert!(validate_invoice_transition(InvoiceStatus::Paid, InvoiceStatus::Sent).is_err());
    }

    #[test]
    fn invoice_cannot_pay_a_draft() {
        assert!(validate_invoice_transition(InvoiceStatus::Draft, InvoiceStatus::Paid).is_err());
    }
}
