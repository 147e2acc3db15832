//! Document pricing arithmetic.
//!
//! All functions are pure and total over finite input. Values stay
//! unrounded `f64`; presentation rounding is a separate concern
//! (`pressdesk_core::money::present`).

use crate::line_item::LineItem;

/// Total for one line: `quantity * unit_price`.
pub fn line_total(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Document subtotal: sum of the **stored** line totals.
///
/// No recomputation from quantity and unit price happens here; callers
/// keep `LineItem::total` synchronized through the mutators.
pub fn subtotal(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.total).sum()
}

/// Tax amount for a subtotal at a flat percentage rate.
pub fn tax_amount(subtotal: f64, tax_rate: f64) -> f64 {
    subtotal * (tax_rate / 100.0)
}

/// Grand total: subtotal plus tax.
pub fn total(subtotal: f64, tax_amount: f64) -> f64 {
    subtotal + tax_amount
}
