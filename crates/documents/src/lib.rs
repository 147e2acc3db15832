//! Commercial-document domain module.
//!
//! Quotes and invoices: record shapes, status models, human-readable
//! numbering, totals assembly (via `pressdesk-pricing`), and the
//! quote-to-invoice conversion. Deterministic domain logic only; no IO,
//! no storage, no transport.

pub mod convert;
pub mod customer;
pub mod invoice;
pub mod numbering;
pub mod quote;
pub mod transitions;

pub use convert::convert_quote_to_invoice;
pub use customer::CustomerRef;
pub use invoice::{Invoice, InvoiceStatus};
pub use numbering::{DocumentKind, DocumentSequence};
pub use quote::{Quote, QuoteStatus};
