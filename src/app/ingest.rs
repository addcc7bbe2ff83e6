//! Turning uploaded file handles into per-source aggregates.
//!
//! No export format is parsed yet. [`PlaceholderIngestor`] stands in for a
//! real parser by drawing plausible order and revenue totals at random.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{FileHandle, Source, SourceAggregate, SourceAggregates, SourceFiles};

/// Orders drawn for a source with files.
pub const PLACEHOLDER_ORDERS: RangeInclusive<u64> = 10..=109;

/// Whole-currency revenue drawn for a source with files.
pub const PLACEHOLDER_REVENUE: RangeInclusive<i64> = 5_000..=54_999;

/// Produces one aggregate per source from that source's files.
pub trait Ingestor: Send {
    /// Aggregate a source's files. An empty slice yields an unavailable
    /// aggregate.
    fn ingest(&mut self, source: Source, files: &[FileHandle]) -> SourceAggregate;
}

/// Ingestor that ignores file contents and returns random totals.
pub struct PlaceholderIngestor<R = StdRng> {
    rng: R,
}

impl PlaceholderIngestor<StdRng> {
    /// Non-deterministic ingestor seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible ingestor.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PlaceholderIngestor<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Ingestor for PlaceholderIngestor<R> {
    fn ingest(&mut self, source: Source, files: &[FileHandle]) -> SourceAggregate {
        if files.is_empty() {
            debug!(%source, "no files, source unavailable");
            return SourceAggregate::unavailable();
        }

        let orders = self.rng.gen_range(PLACEHOLDER_ORDERS);
        let revenue = Decimal::from(self.rng.gen_range(PLACEHOLDER_REVENUE));
        debug!(%source, files = files.len(), orders, %revenue, "ingested placeholder totals");
        SourceAggregate::new(orders, revenue)
    }
}

/// Ingest every source exactly once, in reporting order.
pub fn ingest_all(ingestor: &mut dyn Ingestor, files: &SourceFiles) -> SourceAggregates {
    SourceAggregates::new(
        ingestor.ingest(Source::Pos, &files.pos),
        ingestor.ingest(Source::PlatformA, &files.platform_a),
        ingestor.ingest(Source::PlatformB, &files.platform_b),
    )
}
