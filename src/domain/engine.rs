//! Reconciliation engine: turns three source aggregates into a [`Report`].

use chrono::{DateTime, Local, Utc};
use rand::Rng;
use uuid::Uuid;

use super::breakdown::breakdown;
use super::financial::financial;
use super::period::ReportPeriod;
use super::policy::ReconciliationPolicy;
use super::report::Report;
use super::series::synthesize;
use super::source::{PlatformNames, SourceAggregates};
use super::summary::summarize;
use super::variance::variance;

/// Pure report builder parameterized by a policy and platform names.
///
/// Holds no mutable state; concurrent calls are independent.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    policy: ReconciliationPolicy,
    names: PlatformNames,
}

impl ReconciliationEngine {
    #[must_use]
    pub fn new(policy: ReconciliationPolicy, names: PlatformNames) -> Self {
        Self { policy, names }
    }

    #[must_use]
    pub fn policy(&self) -> &ReconciliationPolicy {
        &self.policy
    }

    #[must_use]
    pub fn names(&self) -> &PlatformNames {
        &self.names
    }

    /// Build a full report for `period` as of `now`.
    ///
    /// `rng` drives only the daily series jitter; every other section is a
    /// deterministic function of the aggregates and the policy.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        sources: &SourceAggregates,
        period: ReportPeriod,
        now: DateTime<Local>,
        rng: &mut R,
    ) -> Report {
        let today = now.date_naive();
        let summary = summarize(
            &sources.pos,
            &sources.platform_a,
            &sources.platform_b,
            self.policy.variance_threshold,
        );
        let variance = variance(summary.revenue_variance, self.policy.rejection_share);

        Report {
            id: Uuid::new_v4(),
            period,
            period_label: period.label(today),
            generated_at: now.with_timezone(&Utc),
            sources: sources.clone(),
            platforms: breakdown(&sources.platform_a, &sources.platform_b, &self.names),
            financial: financial(&sources.platform_a, &sources.platform_b, &self.policy),
            daily: synthesize(
                period,
                &sources.platform_a,
                &sources.platform_b,
                today,
                &self.policy,
                rng,
            ),
            variance,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::SourceAggregate;
    use crate::domain::summary::ReconciliationStatus;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn report_sections_are_consistent() {
        let engine = ReconciliationEngine::default();
        let sources = SourceAggregates::new(
            SourceAggregate::new(100, dec!(50000)),
            SourceAggregate::new(40, dec!(20000)),
            SourceAggregate::new(35, dec!(15000)),
        );

        let report = engine.generate(
            &sources,
            ReportPeriod::Weekly,
            now(),
            &mut StdRng::seed_from_u64(5),
        );

        assert_eq!(report.summary.status, ReconciliationStatus::Fail);
        assert_eq!(report.platforms.len(), 2);
        assert_eq!(report.financial.len(), 5);
        assert_eq!(report.variance.len(), 2);
        assert_eq!(report.daily.len(), 7);
        assert_eq!(report.period_label, "10/11/2026 to 10/17/2026");
        assert_eq!(report.financial[0].amount, report.summary.platform_revenue);
    }

    #[test]
    fn threshold_comes_from_policy() {
        let policy = ReconciliationPolicy {
            variance_threshold: dec!(35),
            ..ReconciliationPolicy::default()
        };
        let engine = ReconciliationEngine::new(policy, PlatformNames::default());
        let sources = SourceAggregates::new(
            SourceAggregate::new(100, dec!(50000)),
            SourceAggregate::new(40, dec!(20000)),
            SourceAggregate::new(35, dec!(15000)),
        );

        let report = engine.generate(
            &sources,
            ReportPeriod::Daily,
            now(),
            &mut StdRng::seed_from_u64(5),
        );
        assert_eq!(report.summary.status, ReconciliationStatus::Pass);
    }
}
