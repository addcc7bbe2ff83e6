//! Synthesized day-by-day performance series.
//!
//! Period totals are split evenly across the days of the period and each day
//! is perturbed with symmetric random jitter. Summing the series therefore
//! only approximates the period totals.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Amount;
use super::period::ReportPeriod;
use super::policy::ReconciliationPolicy;
use super::source::SourceAggregate;

/// One day of platform activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPerformanceRow {
    pub date: NaiveDate,
    /// Short month and day, e.g. "Oct 17".
    pub label: String,
    pub platform_a_orders: u64,
    pub platform_b_orders: u64,
    pub total_orders: u64,
    pub platform_a_revenue: Amount,
    pub platform_b_revenue: Amount,
    pub total_revenue: Amount,
    pub estimated_payout: Amount,
}

/// Column sums over a daily series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesTotals {
    pub platform_a_orders: u64,
    pub platform_b_orders: u64,
    pub total_orders: u64,
    pub platform_a_revenue: Amount,
    pub platform_b_revenue: Amount,
    pub total_revenue: Amount,
    pub estimated_payout: Amount,
}

/// Build a daily series covering the `period.days()` days ending on `today`,
/// in ascending date order.
///
/// Each value is `floor(total / days)` plus jitter drawn from `rng` within the
/// policy's half-widths, clamped at zero. Day totals are the sums of the
/// clamped platform values. Estimated payout applies the policy's flat payout
/// ratio, independent of the financial waterfall.
pub fn synthesize<R: Rng + ?Sized>(
    period: ReportPeriod,
    platform_a: &SourceAggregate,
    platform_b: &SourceAggregate,
    today: NaiveDate,
    policy: &ReconciliationPolicy,
    rng: &mut R,
) -> Vec<DailyPerformanceRow> {
    let days = period.days();
    let jitter = &policy.jitter;

    let a_orders_base = platform_a.counted_orders() / u64::from(days);
    let b_orders_base = platform_b.counted_orders() / u64::from(days);
    let a_revenue_base = (platform_a.counted_revenue() / Decimal::from(days)).floor();
    let b_revenue_base = (platform_b.counted_revenue() / Decimal::from(days)).floor();

    (0..days)
        .map(|i| {
            let date = today - Duration::days(i64::from(days - 1 - i));

            let platform_a_orders = jitter_count(a_orders_base, jitter.platform_a_orders, rng);
            let platform_b_orders = jitter_count(b_orders_base, jitter.platform_b_orders, rng);
            let platform_a_revenue = jitter_amount(a_revenue_base, jitter.platform_a_revenue, rng);
            let platform_b_revenue = jitter_amount(b_revenue_base, jitter.platform_b_revenue, rng);

            let total_revenue = platform_a_revenue + platform_b_revenue;

            DailyPerformanceRow {
                date,
                label: date.format("%b %-d").to_string(),
                platform_a_orders,
                platform_b_orders,
                total_orders: platform_a_orders + platform_b_orders,
                platform_a_revenue,
                platform_b_revenue,
                total_revenue,
                estimated_payout: total_revenue * policy.payout_ratio,
            }
        })
        .collect()
}

/// Sum every column of a series.
#[must_use]
pub fn totals(rows: &[DailyPerformanceRow]) -> SeriesTotals {
    rows.iter().fold(SeriesTotals::default(), |mut acc, row| {
        acc.platform_a_orders += row.platform_a_orders;
        acc.platform_b_orders += row.platform_b_orders;
        acc.total_orders += row.total_orders;
        acc.platform_a_revenue += row.platform_a_revenue;
        acc.platform_b_revenue += row.platform_b_revenue;
        acc.total_revenue += row.total_revenue;
        acc.estimated_payout += row.estimated_payout;
        acc
    })
}

fn jitter_count<R: Rng + ?Sized>(base: u64, half_width: u32, rng: &mut R) -> u64 {
    let spread = i64::from(half_width);
    let offset = rng.gen_range(-spread..=spread);
    let base = i64::try_from(base).unwrap_or(i64::MAX);
    u64::try_from(base.saturating_add(offset)).unwrap_or(0)
}

// Jitter is drawn in hundredths so revenue keeps two decimal places.
fn jitter_amount<R: Rng + ?Sized>(base: Amount, half_width: Decimal, rng: &mut R) -> Amount {
    let spread = (half_width.abs() * Decimal::ONE_HUNDRED)
        .trunc()
        .to_i64()
        .unwrap_or(0);
    let offset = Decimal::new(rng.gen_range(-spread..=spread), 2);
    (base + offset).max(Decimal::ZERO)
}
