//! Report presentation: overview cards and the five report tables.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::builder::Builder;
use tabled::{Table, Tabled};

use super::output::{self, Tone};
use super::Section;
use crate::domain::breakdown;
use crate::domain::series;
use crate::domain::{Impact, PlatformNames, Report};
use crate::error::Result;

/// Everything needed to present a report besides the report itself.
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    pub report: &'a Report,
    pub names: &'a PlatformNames,
    pub currency: &'a str,
    /// Ratio behind the overview's estimated payout card.
    pub payout_ratio: Decimal,
}

/// Health band for a coverage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBand {
    Excellent,
    Good,
    NeedsAttention,
}

impl CoverageBand {
    #[must_use]
    pub fn from_coverage(coverage: Decimal) -> Self {
        if coverage >= Decimal::from(95) {
            Self::Excellent
        } else if coverage >= Decimal::from(85) {
            Self::Good
        } else {
            Self::NeedsAttention
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsAttention => "Needs Attention",
        }
    }

    fn styled(self) -> String {
        match self {
            Self::Excellent => output::paint(format!("✓ {}", self.label()), Tone::Positive),
            Self::Good => output::paint(format!("⚠ {}", self.label()), Tone::Caution),
            Self::NeedsAttention => output::paint(format!("× {}", self.label()), Tone::Negative),
        }
    }
}

/// Print the requested sections, or the whole report as one JSON line.
pub fn print_report(view: &ReportView<'_>, sections: &[Section]) -> Result<()> {
    if output::is_json() {
        output::event("report", serde_json::to_value(view.report)?);
        output::event(
            "overview",
            json!({ "estimated_payout": estimated_payout(view) }),
        );
        return Ok(());
    }

    for section in sections {
        match section {
            Section::Overview => overview(view),
            Section::Executive => executive(view),
            Section::Platforms => platforms(view),
            Section::Financial => financial(view),
            Section::Variance => variance(view),
            Section::Daily => daily(view),
        }
    }
    println!();
    Ok(())
}

fn estimated_payout(view: &ReportView<'_>) -> Decimal {
    view.report.summary.platform_revenue * view.payout_ratio
}

fn overview(view: &ReportView<'_>) {
    let summary = &view.report.summary;
    output::section(&format!("Dashboard overview · {}", view.report.period_label));

    output::field(
        "Order Coverage",
        format!(
            "{}  {}",
            percent(summary.order_coverage),
            CoverageBand::from_coverage(summary.order_coverage).styled()
        ),
    );
    output::field(
        "Revenue Coverage",
        format!(
            "{}  {}",
            percent(summary.revenue_coverage),
            CoverageBand::from_coverage(summary.revenue_coverage).styled()
        ),
    );
    let within = if summary.status.is_pass() {
        output::paint("✓ Within Threshold", Tone::Positive)
    } else {
        output::paint("⚠ Above Threshold", Tone::Caution)
    };
    output::field(
        "Revenue Variance",
        format!("{}  {within}", percent(summary.variance_percentage)),
    );
    output::field(
        "Estimated Payout",
        amount(view.currency, estimated_payout(view)),
    );
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn executive(view: &ReportView<'_>) {
    let report = view.report;
    let summary = &report.summary;
    let currency = view.currency;

    let pos_orders = if report.sources.pos.available {
        summary.pos_orders.to_string()
    } else {
        "Data Not Available".to_string()
    };
    let rows = vec![
        MetricRow {
            metric: "Reporting Period",
            value: report.period_label.clone(),
        },
        MetricRow {
            metric: "POS Delivery Orders",
            value: pos_orders,
        },
        MetricRow {
            metric: "Platform Orders Combined",
            value: summary.platform_orders.to_string(),
        },
        MetricRow {
            metric: "Order Coverage",
            value: percent(summary.order_coverage),
        },
        MetricRow {
            metric: "POS Delivery Revenue",
            value: amount(currency, summary.pos_revenue),
        },
        MetricRow {
            metric: "Platform Revenue Combined",
            value: amount(currency, summary.platform_revenue),
        },
        MetricRow {
            metric: "Revenue Coverage",
            value: percent(summary.revenue_coverage),
        },
        MetricRow {
            metric: "Revenue Variance",
            value: format!(
                "{} ({})",
                amount(currency, summary.revenue_variance.abs()),
                percent(summary.variance_percentage)
            ),
        },
        MetricRow {
            metric: "Reconciliation Status",
            value: summary.status.to_string(),
        },
    ];

    output::section("Executive summary");
    output::table(Table::new(rows));
}

fn platforms(view: &ReportView<'_>) {
    let currency = view.currency;
    let entries = &view.report.platforms;

    let mut builder = Builder::default();
    builder.push_record(["Platform", "Orders", "Revenue", "Market Share", "AOV", "Status"]);
    for entry in entries {
        if entry.available {
            builder.push_record([
                entry.platform_name.clone(),
                entry.orders.to_string(),
                amount(currency, entry.revenue),
                percent(entry.market_share),
                fixed_amount(currency, entry.average_order_value),
                "Available".to_string(),
            ]);
        } else {
            builder.push_record([
                entry.platform_name.clone(),
                "N/A".to_string(),
                "N/A".to_string(),
                "N/A".to_string(),
                "N/A".to_string(),
                "No Data".to_string(),
            ]);
        }
    }

    let totals = breakdown::totals(entries);
    builder.push_record([
        "Combined Total".to_string(),
        totals.orders.to_string(),
        amount(currency, totals.revenue),
        "100.0%".to_string(),
        fixed_amount(currency, totals.average_order_value),
        "Calculated".to_string(),
    ]);

    output::section("Platform breakdown");
    output::table(builder.build());
}

#[derive(Tabled)]
struct FinancialRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Percentage")]
    percentage: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
}

fn financial(view: &ReportView<'_>) {
    let rows = view.report.financial.iter().map(|item| FinancialRow {
        component: item.component.clone(),
        amount: amount(view.currency, item.amount),
        percentage: percent(item.percentage),
        kind: match item.impact {
            Impact::Baseline => "Base",
            Impact::Positive => "Revenue",
            Impact::Negative => "Cost",
        },
    });

    output::section("Financial analysis");
    output::table(Table::new(rows));
}

#[derive(Tabled)]
struct VarianceRow {
    #[tabled(rename = "Variance Component")]
    component: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Percentage")]
    percentage: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Explanation")]
    explanation: String,
}

fn variance(view: &ReportView<'_>) {
    let rows = view.report.variance.iter().map(|item| VarianceRow {
        component: item.component.clone(),
        amount: amount(view.currency, item.amount),
        percentage: percent(item.percentage),
        status: item.status.label(),
        explanation: item.explanation.clone(),
    });

    output::section("Variance analysis");
    output::table(Table::new(rows));
}

fn daily(view: &ReportView<'_>) {
    let currency = view.currency;
    let (a, b) = (&view.names.platform_a, &view.names.platform_b);

    let mut builder = Builder::default();
    builder.push_record([
        "Date".to_string(),
        format!("{a} Orders"),
        format!("{b} Orders"),
        "Total Orders".to_string(),
        format!("{a} Revenue"),
        format!("{b} Revenue"),
        "Total Revenue".to_string(),
        "Estimated Payout".to_string(),
    ]);
    for row in &view.report.daily {
        builder.push_record([
            row.label.clone(),
            row.platform_a_orders.to_string(),
            row.platform_b_orders.to_string(),
            row.total_orders.to_string(),
            amount(currency, row.platform_a_revenue),
            amount(currency, row.platform_b_revenue),
            amount(currency, row.total_revenue),
            amount(currency, row.estimated_payout),
        ]);
    }

    let totals = series::totals(&view.report.daily);
    builder.push_record([
        "Total".to_string(),
        totals.platform_a_orders.to_string(),
        totals.platform_b_orders.to_string(),
        totals.total_orders.to_string(),
        amount(currency, totals.platform_a_revenue.floor()),
        amount(currency, totals.platform_b_revenue.floor()),
        amount(currency, totals.total_revenue.floor()),
        amount(currency, totals.estimated_payout.floor()),
    ]);

    output::section(&format!("Daily performance · {}", view.report.period_label));
    output::table(builder.build());
}

/// `₹35,000` or `₹1,234.5`: at most two decimals, no trailing zeros.
#[must_use]
pub fn amount(currency: &str, value: Decimal) -> String {
    let rounded = value.round_dp(2).normalize();
    with_currency(currency, rounded, &rounded.abs().to_string())
}

/// `₹1,234.50`: always two decimals.
#[must_use]
pub fn fixed_amount(currency: &str, value: Decimal) -> String {
    let rounded = value.round_dp(2);
    with_currency(currency, rounded, &format!("{:.2}", rounded.abs()))
}

/// `75.0%`
#[must_use]
pub fn percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

fn with_currency(currency: &str, value: Decimal, digits: &str) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = group_thousands(whole);
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    format!("{sign}{currency}{grouped}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
