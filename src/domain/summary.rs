//! Headline reconciliation metrics: coverage, variance and pass/fail status.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{percent_of, Amount, Percent};
use super::source::SourceAggregate;

/// Outcome of comparing platform revenue against POS revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReconciliationStatus {
    Pass,
    Fail,
}

impl ReconciliationStatus {
    /// `Pass` iff `variance_percentage <= threshold`.
    #[must_use]
    pub fn from_variance(variance_percentage: Percent, threshold: Percent) -> Self {
        if variance_percentage <= threshold {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("PASS"),
            Self::Fail => f.write_str("FAIL"),
        }
    }
}

/// POS versus combined-platform totals for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub pos_orders: u64,
    pub pos_revenue: Amount,
    pub platform_orders: u64,
    pub platform_revenue: Amount,
    /// `pos_orders - platform_orders`; negative when platforms report more.
    pub order_variance: i64,
    /// `pos_revenue - platform_revenue`; negative when platforms report more.
    pub revenue_variance: Amount,
    pub order_coverage: Percent,
    pub revenue_coverage: Percent,
    pub variance_percentage: Percent,
    pub status: ReconciliationStatus,
}

/// Compare POS totals against the combined totals of both platforms.
///
/// Unavailable sources contribute zero. Coverage ratios are not clamped, so
/// platforms reporting more than POS yield coverage above 100%.
#[must_use]
pub fn summarize(
    pos: &SourceAggregate,
    platform_a: &SourceAggregate,
    platform_b: &SourceAggregate,
    threshold: Percent,
) -> ReconciliationSummary {
    let pos_orders = pos.counted_orders();
    let pos_revenue = pos.counted_revenue();

    let platform_orders = platform_a.counted_orders() + platform_b.counted_orders();
    let platform_revenue = platform_a.counted_revenue() + platform_b.counted_revenue();

    let order_variance = signed_difference(pos_orders, platform_orders);
    let revenue_variance = pos_revenue - platform_revenue;

    let order_coverage = percent_of(Decimal::from(platform_orders), Decimal::from(pos_orders));
    let revenue_coverage = percent_of(platform_revenue, pos_revenue);
    let variance_percentage = percent_of(revenue_variance.abs(), pos_revenue);

    ReconciliationSummary {
        pos_orders,
        pos_revenue,
        platform_orders,
        platform_revenue,
        order_variance,
        revenue_variance,
        order_coverage,
        revenue_coverage,
        variance_percentage,
        status: ReconciliationStatus::from_variance(variance_percentage, threshold),
    }
}

fn signed_difference(lhs: u64, rhs: u64) -> i64 {
    let diff = i128::from(lhs) - i128::from(rhs);
    i64::try_from(diff).unwrap_or(if diff.is_negative() { i64::MIN } else { i64::MAX })
}
