//! Attribution of the POS-versus-platform revenue gap.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{Amount, Percent};

/// Classification shown next to each variance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    NoVariance,
    OperationalIssue,
    TimingDifference,
}

impl VarianceStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoVariance => "No Variance",
            Self::OperationalIssue => "Operational Issue",
            Self::TimingDifference => "Timing Difference",
        }
    }
}

impl fmt::Display for VarianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the variance attribution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceLineItem {
    pub component: String,
    pub amount: Amount,
    /// Share of the absolute revenue variance.
    pub percentage: Percent,
    pub status: VarianceStatus,
    pub explanation: String,
}

/// Split the absolute revenue variance into rejections and timing.
///
/// A zero variance yields a single "Perfect Match" row. Otherwise two rows
/// are returned whose amounts sum to `|revenue_variance|` and whose
/// percentages sum to 100. `rejection_share` is the fraction attributed to
/// platform rejections.
#[must_use]
pub fn variance(revenue_variance: Amount, rejection_share: Decimal) -> Vec<VarianceLineItem> {
    let total = revenue_variance.abs();

    if total.is_zero() {
        return vec![VarianceLineItem {
            component: "Perfect Match".into(),
            amount: Decimal::ZERO,
            percentage: Decimal::ONE_HUNDRED,
            status: VarianceStatus::NoVariance,
            explanation: "Revenue perfectly matched across all platforms".into(),
        }];
    }

    let rejections = total * rejection_share;
    let timing = total - rejections;
    let rejection_pct = rejection_share * Decimal::ONE_HUNDRED;

    vec![
        VarianceLineItem {
            component: "Platform Rejections".into(),
            amount: rejections,
            percentage: rejection_pct,
            status: VarianceStatus::OperationalIssue,
            explanation: "Orders processed in POS but rejected by platforms".into(),
        },
        VarianceLineItem {
            component: "Timing Differences".into(),
            amount: timing,
            percentage: Decimal::ONE_HUNDRED - rejection_pct,
            status: VarianceStatus::TimingDifference,
            explanation: "Revenue recognition timing differences".into(),
        },
    ]
}
