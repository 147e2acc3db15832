//! Monetary presentation helpers.
//!
//! Document arithmetic runs on `f64` and is never rounded internally;
//! rounding to two decimals happens only when a value is presented
//! (display, export, receipt rendering).

use rust_decimal::prelude::*;

/// Monetary display precision (2 decimal places, half-up).
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to two decimals for presentation.
///
/// Uses `Decimal` with midpoint-away-from-zero so 0.125 presents as 0.13.
/// Non-finite input degrades to 0.0.
pub fn present(value: f64) -> f64 {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
