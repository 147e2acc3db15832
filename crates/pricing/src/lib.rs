//! Pricing domain module.
//!
//! Pure arithmetic over priced line items: per-line totals, document
//! subtotals, tax, and grand totals. No IO, no rounding, no validation.
//! Arithmetic consistency is this crate's only contract; rejecting bad
//! input is the calling workflow's job.

pub mod calculator;
pub mod line_item;

pub use line_item::LineItem;
