//! Builders for domain primitives used across tests.
//!
//! Keeps scenario setup to one line so tests read as the figures they check.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

use crate::domain::{FileHandle, SourceAggregate, SourceAggregates, SourceFiles};

/// Available aggregate with whole-currency revenue.
pub fn aggregate(orders: u64, revenue: i64) -> SourceAggregate {
    SourceAggregate::new(orders, Decimal::from(revenue))
}

/// Aggregates for POS and both platforms, each `(orders, revenue)`.
/// `None` marks the source unavailable.
pub fn aggregates(
    pos: Option<(u64, i64)>,
    platform_a: Option<(u64, i64)>,
    platform_b: Option<(u64, i64)>,
) -> SourceAggregates {
    let build = |figures: Option<(u64, i64)>| {
        figures.map_or_else(SourceAggregate::unavailable, |(orders, revenue)| {
            aggregate(orders, revenue)
        })
    };
    SourceAggregates::new(build(pos), build(platform_a), build(platform_b))
}

/// One file per named source; empty names leave the source without files.
pub fn files(pos: &[&str], platform_a: &[&str], platform_b: &[&str]) -> SourceFiles {
    let handles = |names: &[&str]| -> Vec<FileHandle> {
        names.iter().map(|n| FileHandle::new(*n)).collect()
    };
    SourceFiles::new(handles(pos), handles(platform_a), handles(platform_b))
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Local noon on the given date, so period math never straddles midnight.
pub fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Local> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid test date");
    Local
        .from_local_datetime(&naive)
        .earliest()
        .expect("unambiguous local noon")
}
