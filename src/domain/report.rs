//! The complete reconciliation report handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::breakdown::PlatformBreakdownEntry;
use super::financial::FinancialLineItem;
use super::period::ReportPeriod;
use super::series::DailyPerformanceRow;
use super::source::SourceAggregates;
use super::summary::ReconciliationSummary;
use super::variance::VarianceLineItem;

/// Immutable output of one report generation.
///
/// A new generation produces a new `Report`; nothing mutates an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub period: ReportPeriod,
    pub period_label: String,
    pub generated_at: DateTime<Utc>,
    pub sources: SourceAggregates,
    pub summary: ReconciliationSummary,
    pub platforms: Vec<PlatformBreakdownEntry>,
    pub financial: Vec<FinancialLineItem>,
    pub variance: Vec<VarianceLineItem>,
    pub daily: Vec<DailyPerformanceRow>,
}
