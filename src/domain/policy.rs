//! Rates and thresholds that parameterize the reconciliation engine.
//!
//! The commission, advertising and discount rates, the rejection/timing split
//! and the payout ratio are heuristics with no data behind them. They live
//! here as configuration rather than as literals inside the calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Engine parameters. Rates are fractions (0.20 = 20%); the threshold is a
/// percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationPolicy {
    /// Maximum revenue variance percentage that still passes.
    #[serde(default = "default_variance_threshold")]
    pub variance_threshold: Decimal,
    /// Commission charged by platform A on its own revenue.
    #[serde(default = "default_platform_a_commission")]
    pub platform_a_commission: Decimal,
    /// Commission charged by platform B on its own revenue.
    #[serde(default = "default_platform_b_commission")]
    pub platform_b_commission: Decimal,
    #[serde(default = "default_advertising_rate")]
    pub advertising_rate: Decimal,
    #[serde(default = "default_discount_rate")]
    pub discount_rate: Decimal,
    /// Share of unexplained variance attributed to platform rejections; the
    /// remainder is attributed to timing differences.
    #[serde(default = "default_rejection_share")]
    pub rejection_share: Decimal,
    /// Flat net-of-deductions ratio used for daily payout estimates.
    #[serde(default = "default_payout_ratio")]
    pub payout_ratio: Decimal,
    #[serde(default)]
    pub jitter: SeriesJitter,
}

fn default_variance_threshold() -> Decimal {
    dec!(5.0)
}

fn default_platform_a_commission() -> Decimal {
    dec!(0.20)
}

fn default_platform_b_commission() -> Decimal {
    dec!(0.22)
}

fn default_advertising_rate() -> Decimal {
    dec!(0.05)
}

fn default_discount_rate() -> Decimal {
    dec!(0.15)
}

fn default_rejection_share() -> Decimal {
    dec!(0.60)
}

fn default_payout_ratio() -> Decimal {
    dec!(0.65)
}

impl Default for ReconciliationPolicy {
    fn default() -> Self {
        Self {
            variance_threshold: default_variance_threshold(),
            platform_a_commission: default_platform_a_commission(),
            platform_b_commission: default_platform_b_commission(),
            advertising_rate: default_advertising_rate(),
            discount_rate: default_discount_rate(),
            rejection_share: default_rejection_share(),
            payout_ratio: default_payout_ratio(),
            jitter: SeriesJitter::default(),
        }
    }
}

/// Half-widths of the symmetric random jitter applied per day when
/// synthesizing the daily series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesJitter {
    #[serde(default = "default_platform_a_orders")]
    pub platform_a_orders: u32,
    #[serde(default = "default_platform_b_orders")]
    pub platform_b_orders: u32,
    #[serde(default = "default_platform_a_revenue")]
    pub platform_a_revenue: Decimal,
    #[serde(default = "default_platform_b_revenue")]
    pub platform_b_revenue: Decimal,
}

const fn default_platform_a_orders() -> u32 {
    5
}

const fn default_platform_b_orders() -> u32 {
    2
}

fn default_platform_a_revenue() -> Decimal {
    dec!(500)
}

fn default_platform_b_revenue() -> Decimal {
    dec!(250)
}

impl SeriesJitter {
    /// No jitter at all; the series becomes an even split of the totals.
    #[must_use]
    pub fn none() -> Self {
        Self {
            platform_a_orders: 0,
            platform_b_orders: 0,
            platform_a_revenue: Decimal::ZERO,
            platform_b_revenue: Decimal::ZERO,
        }
    }
}

impl Default for SeriesJitter {
    fn default() -> Self {
        Self {
            platform_a_orders: default_platform_a_orders(),
            platform_b_orders: default_platform_b_orders(),
            platform_a_revenue: default_platform_a_revenue(),
            platform_b_revenue: default_platform_b_revenue(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_rates() {
        let policy = ReconciliationPolicy::default();
        assert_eq!(policy.variance_threshold, dec!(5));
        assert_eq!(policy.platform_a_commission, dec!(0.20));
        assert_eq!(policy.platform_b_commission, dec!(0.22));
        assert_eq!(policy.payout_ratio, dec!(0.65));
        assert_eq!(policy.jitter.platform_a_orders, 5);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let policy: ReconciliationPolicy = toml::from_str("variance_threshold = 2.5").unwrap();
        assert_eq!(policy.variance_threshold, dec!(2.5));
        assert_eq!(policy.rejection_share, dec!(0.60));
        assert_eq!(policy.jitter, SeriesJitter::default());
    }
}
