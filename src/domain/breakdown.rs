//! Per-platform share of orders and average order value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{per_unit, percent_of, Amount, Percent};
use super::source::{PlatformNames, Source, SourceAggregate};

/// One platform's row in the breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBreakdownEntry {
    pub source: Source,
    pub platform_name: String,
    pub orders: u64,
    pub revenue: Amount,
    pub market_share: Percent,
    pub average_order_value: Amount,
    pub available: bool,
}

/// Combined row across both platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownTotals {
    pub orders: u64,
    pub revenue: Amount,
    pub average_order_value: Amount,
}

/// Break platform totals down per platform, always in `[A, B]` order.
///
/// An unavailable platform keeps its row, with zero figures and
/// `available = false`.
#[must_use]
pub fn breakdown(
    platform_a: &SourceAggregate,
    platform_b: &SourceAggregate,
    names: &PlatformNames,
) -> Vec<PlatformBreakdownEntry> {
    let total_orders = platform_a.counted_orders() + platform_b.counted_orders();

    [(Source::PlatformA, platform_a), (Source::PlatformB, platform_b)]
        .into_iter()
        .map(|(source, agg)| {
            let orders = agg.counted_orders();
            let revenue = agg.counted_revenue();
            PlatformBreakdownEntry {
                source,
                platform_name: names.name_of(source).to_string(),
                orders,
                revenue,
                market_share: percent_of(Decimal::from(orders), Decimal::from(total_orders)),
                average_order_value: per_unit(revenue, orders),
                available: agg.available,
            }
        })
        .collect()
}

/// Sum the available rows of a breakdown.
#[must_use]
pub fn totals(entries: &[PlatformBreakdownEntry]) -> BreakdownTotals {
    let (orders, revenue) = entries
        .iter()
        .filter(|e| e.available)
        .fold((0u64, Decimal::ZERO), |(o, r), e| (o + e.orders, r + e.revenue));

    BreakdownTotals {
        orders,
        revenue,
        average_order_value: per_unit(revenue, orders),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn shares_and_aov() {
        let rows = breakdown(
            &SourceAggregate::new(40, dec!(20000)),
            &SourceAggregate::new(60, dec!(15000)),
            &PlatformNames::default(),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source, Source::PlatformA);
        assert_eq!(rows[0].platform_name, "Zomato");
        assert_eq!(rows[0].market_share, dec!(40));
        assert_eq!(rows[0].average_order_value, dec!(500));
        assert_eq!(rows[1].market_share, dec!(60));
        assert_eq!(rows[1].average_order_value, dec!(250));
    }

    #[test]
    fn unavailable_platform_keeps_its_row() {
        let rows = breakdown(
            &SourceAggregate::unavailable(),
            &SourceAggregate::new(10, dec!(1000)),
            &PlatformNames::default(),
        );

        assert!(!rows[0].available);
        assert_eq!(rows[0].orders, 0);
        assert_eq!(rows[0].market_share, Decimal::ZERO);
        assert_eq!(rows[0].average_order_value, Decimal::ZERO);
        assert_eq!(rows[1].market_share, dec!(100));
    }

    #[test]
    fn no_orders_anywhere_yields_zero_shares() {
        let rows = breakdown(
            &SourceAggregate::unavailable(),
            &SourceAggregate::unavailable(),
            &PlatformNames::default(),
        );
        assert!(rows.iter().all(|r| r.market_share.is_zero()));
    }

    #[test]
    fn totals_skip_unavailable_rows() {
        let rows = breakdown(
            &SourceAggregate::new(20, dec!(4000)),
            &SourceAggregate::unavailable(),
            &PlatformNames::default(),
        );
        let total = totals(&rows);
        assert_eq!(total.orders, 20);
        assert_eq!(total.revenue, dec!(4000));
        assert_eq!(total.average_order_value, dec!(200));
    }
}
