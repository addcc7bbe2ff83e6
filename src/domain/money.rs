//! Monetary and percentage types for reconciliation figures.

use rust_decimal::Decimal;

/// Currency amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Percentage on a 0-100 scale.
pub type Percent = Decimal;

/// Express `part` as a percentage of `whole`, or zero when `whole` is zero.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Percent {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Divide `numerator` by a count, or zero when the count is zero.
#[must_use]
pub fn per_unit(numerator: Amount, count: u64) -> Amount {
    if count == 0 {
        Decimal::ZERO
    } else {
        numerator / Decimal::from(count)
    }
}
