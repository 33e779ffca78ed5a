//! Monetary values

use rust_decimal::Decimal;

/// Number of decimal places kept for stored monetary amounts.
pub const SCALE: u32 = 2;

/// Round a monetary amount to the storage scale.
///
/// Midpoints round half to even.
#[must_use]
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp(SCALE)
}

/// Format a monetary amount with exactly two decimal places.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", to_cents(amount))
}
