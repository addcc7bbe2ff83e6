//! Pure reconciliation logic: no I/O, no clocks, no global state.

mod engine;
mod money;
mod period;
mod policy;
mod report;
mod source;

pub mod breakdown;
pub mod financial;
pub mod series;
pub mod summary;
pub mod variance;

pub use breakdown::{BreakdownTotals, PlatformBreakdownEntry};
pub use engine::ReconciliationEngine;
pub use financial::{FinancialLineItem, Impact};
pub use money::{per_unit, percent_of, Amount, Percent};
pub use period::{ParsePeriodError, ReportPeriod};
pub use policy::{ReconciliationPolicy, SeriesJitter};
pub use report::Report;
pub use series::{DailyPerformanceRow, SeriesTotals};
pub use source::{
    BySource, FileHandle, PlatformNames, Source, SourceAggregate, SourceAggregates, SourceFiles,
};
pub use summary::{ReconciliationStatus, ReconciliationSummary};
pub use variance::{VarianceLineItem, VarianceStatus};
