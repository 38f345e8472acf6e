//! Fixed-precision amount rounding and formatting.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount that crosses a serialization boundary goes through one of
//! the formatters below, so the number of fractional digits is fixed by the
//! field kind and never by the arithmetic that produced the value.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for currency amounts (RSD and document currencies).
pub const AMOUNT_SCALE: u32 = 2;

/// Decimal places for unit prices and quantities.
pub const UNIT_PRICE_SCALE: u32 = 4;

/// Default tolerance when comparing rounded amounts (0.01).
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rounds a currency amount to two decimals, midpoint away from zero.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a unit price to four decimals, midpoint away from zero.
#[must_use]
pub fn round_unit_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(UNIT_PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a currency amount with exactly two fractional digits.
///
/// `1200` becomes `"1200.00"`, `12.345` becomes `"12.35"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_amount(amount);
    rounded.rescale(AMOUNT_SCALE);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Formats a unit-price-like value without padding.
///
/// The value is rounded to four decimals and trailing zeros are removed,
/// keeping at least the integer part: `100.5000` becomes `"100.5"` and
/// `100.0000` becomes `"100"`.
#[must_use]
pub fn format_trimmed(value: Decimal) -> String {
    let mut trimmed = round_unit_price(value).normalize();
    if trimmed.is_zero() {
        trimmed.set_sign_positive(true);
    }
    trimmed.to_string()
}

/// Formats a quantity. Quantities follow the unit price rule.
#[must_use]
pub fn format_quantity(quantity: Decimal) -> String {
    format_trimmed(quantity)
}

/// Returns true if `a` and `b` differ by at most `tolerance`.
#[must_use]
pub fn within_tolerance(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}
