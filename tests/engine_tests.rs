//! End-to-end checks of the reconciliation engine's report sections.

use cafe_recon::domain::{
    Impact, ReconciliationEngine, ReconciliationStatus, ReportPeriod, VarianceStatus,
};
use cafe_recon::testkit::domain::{aggregates, local_noon, seeded_rng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn engine() -> ReconciliationEngine {
    ReconciliationEngine::default()
}

#[test]
fn partial_platform_coverage_fails_reconciliation() {
    let sources = aggregates(Some((100, 50_000)), Some((40, 20_000)), Some((35, 15_000)));
    let report = engine().generate(
        &sources,
        ReportPeriod::Weekly,
        local_noon(2026, 10, 17),
        &mut seeded_rng(1),
    );

    let summary = &report.summary;
    assert_eq!(summary.platform_orders, 75);
    assert_eq!(summary.platform_revenue, dec!(35000));
    assert_eq!(summary.order_coverage, dec!(75));
    assert_eq!(summary.revenue_coverage, dec!(70));
    assert_eq!(summary.order_variance, 25);
    assert_eq!(summary.revenue_variance, dec!(15000));
    assert_eq!(summary.variance_percentage, dec!(30));
    assert_eq!(summary.status, ReconciliationStatus::Fail);

    assert_eq!(report.period_label, "10/11/2026 to 10/17/2026");
}

#[test]
fn financial_rows_follow_the_payout_waterfall() {
    let sources = aggregates(Some((100, 50_000)), Some((40, 20_000)), Some((35, 15_000)));
    let report = engine().generate(
        &sources,
        ReportPeriod::Daily,
        local_noon(2026, 10, 17),
        &mut seeded_rng(2),
    );

    let amounts: Vec<Decimal> = report.financial.iter().map(|r| r.amount).collect();
    assert_eq!(
        amounts,
        vec![dec!(35000), dec!(7300), dec!(1750), dec!(5250), dec!(20700)]
    );
    assert_eq!(report.financial[0].impact, Impact::Baseline);

    let deductions_and_net: Decimal = report.financial[1..].iter().map(|r| r.percentage).sum();
    assert_eq!(deductions_and_net.round_dp(6), dec!(100));
}

#[test]
fn variance_is_split_between_rejections_and_timing() {
    let sources = aggregates(Some((100, 50_000)), Some((40, 20_000)), Some((35, 15_000)));
    let report = engine().generate(
        &sources,
        ReportPeriod::Daily,
        local_noon(2026, 10, 17),
        &mut seeded_rng(3),
    );

    assert_eq!(report.variance.len(), 2);
    assert_eq!(report.variance[0].amount, dec!(9000));
    assert_eq!(report.variance[0].status, VarianceStatus::OperationalIssue);
    assert_eq!(report.variance[1].amount, dec!(6000));
    assert_eq!(report.variance[1].status, VarianceStatus::TimingDifference);

    let pct: Decimal = report.variance.iter().map(|r| r.percentage).sum();
    assert_eq!(pct, dec!(100));
}

#[test]
fn matched_revenue_passes_with_a_single_variance_row() {
    let sources = aggregates(Some((60, 30_000)), Some((30, 18_000)), Some((30, 12_000)));
    let report = engine().generate(
        &sources,
        ReportPeriod::Monthly,
        local_noon(2026, 2, 10),
        &mut seeded_rng(4),
    );

    assert_eq!(report.summary.status, ReconciliationStatus::Pass);
    assert_eq!(report.variance.len(), 1);
    assert_eq!(report.variance[0].component, "Perfect Match");
    assert_eq!(report.period_label, "February 2026");
}

#[test]
fn missing_pos_data_guards_every_ratio() {
    let sources = aggregates(None, Some((40, 20_000)), None);
    let report = engine().generate(
        &sources,
        ReportPeriod::Weekly,
        local_noon(2026, 10, 17),
        &mut seeded_rng(5),
    );

    let summary = &report.summary;
    assert_eq!(summary.order_coverage, Decimal::ZERO);
    assert_eq!(summary.revenue_coverage, Decimal::ZERO);
    assert_eq!(summary.variance_percentage, Decimal::ZERO);
    assert_eq!(summary.status, ReconciliationStatus::Pass);

    let b = &report.platforms[1];
    assert!(!b.available);
    assert_eq!(b.orders, 0);
    assert_eq!(report.platforms[0].market_share, dec!(100));
}

#[test]
fn daily_series_length_tracks_the_period() {
    let sources = aggregates(Some((100, 50_000)), Some((40, 20_000)), Some((35, 15_000)));
    let now = local_noon(2026, 10, 17);

    for (period, days) in [
        (ReportPeriod::Daily, 1),
        (ReportPeriod::Weekly, 7),
        (ReportPeriod::Monthly, 30),
    ] {
        let report = engine().generate(&sources, period, now, &mut seeded_rng(6));
        assert_eq!(report.daily.len(), days, "{period}");
        assert_eq!(
            report.daily.last().map(|row| row.date),
            Some(now.date_naive())
        );
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let sources = aggregates(Some((100, 50_000)), Some((40, 20_000)), Some((35, 15_000)));
    let now = local_noon(2026, 10, 17);

    let first = engine().generate(&sources, ReportPeriod::Weekly, now, &mut seeded_rng(8));
    let second = engine().generate(&sources, ReportPeriod::Weekly, now, &mut seeded_rng(8));
    assert_eq!(first.daily, second.daily);
    assert_ne!(first.id, second.id);
}
