//! Commission, advertising and discount deductions from platform revenue.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{percent_of, Amount, Percent};
use super::policy::ReconciliationPolicy;
use super::source::SourceAggregate;

/// How a line affects the operator's payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Baseline,
    Positive,
    Negative,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => f.write_str("baseline"),
            Self::Positive => f.write_str("positive"),
            Self::Negative => f.write_str("negative"),
        }
    }
}

/// One row of the payout waterfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialLineItem {
    pub component: String,
    pub amount: Amount,
    /// Share of gross platform revenue.
    pub percentage: Percent,
    pub impact: Impact,
}

impl FinancialLineItem {
    fn new(component: &str, amount: Amount, gross: Amount, impact: Impact) -> Self {
        Self {
            component: component.to_string(),
            amount,
            percentage: percent_of(amount, gross),
            impact,
        }
    }
}

/// Estimate the payout waterfall for combined platform revenue.
///
/// Always returns five rows: gross revenue, commission, advertising,
/// discounts and net payout. Commission applies each platform's own rate to
/// that platform's revenue; net payout is the residual.
#[must_use]
pub fn financial(
    platform_a: &SourceAggregate,
    platform_b: &SourceAggregate,
    policy: &ReconciliationPolicy,
) -> Vec<FinancialLineItem> {
    let gross = platform_a.counted_revenue() + platform_b.counted_revenue();

    let commission = platform_a.counted_revenue() * policy.platform_a_commission
        + platform_b.counted_revenue() * policy.platform_b_commission;
    let advertising = gross * policy.advertising_rate;
    let discounts = gross * policy.discount_rate;
    let net_payout = gross - commission - advertising - discounts;

    vec![
        FinancialLineItem {
            component: "Gross Platform Revenue".into(),
            amount: gross,
            percentage: Decimal::ONE_HUNDRED,
            impact: Impact::Baseline,
        },
        FinancialLineItem::new("Estimated Commission", commission, gross, Impact::Negative),
        FinancialLineItem::new("Advertising Spend", advertising, gross, Impact::Negative),
        FinancialLineItem::new("Platform Discounts", discounts, gross, Impact::Negative),
        FinancialLineItem::new("Estimated Net Payout", net_payout, gross, Impact::Positive),
    ]
}
