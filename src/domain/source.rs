//! Data sources, uploaded file handles and per-source aggregates.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Amount;

/// One of the three ledgers being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The café's own point-of-sale ledger, treated as ground truth.
    Pos,
    PlatformA,
    PlatformB,
}

impl Source {
    /// All sources in reporting order.
    pub const ALL: [Source; 3] = [Source::Pos, Source::PlatformA, Source::PlatformB];

    /// Stable machine-readable key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pos => "pos",
            Self::PlatformA => "platform_a",
            Self::PlatformB => "platform_b",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display names of the two delivery platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformNames {
    #[serde(default = "default_platform_a")]
    pub platform_a: String,
    #[serde(default = "default_platform_b")]
    pub platform_b: String,
}

fn default_platform_a() -> String {
    "Zomato".into()
}

fn default_platform_b() -> String {
    "Swiggy".into()
}

impl PlatformNames {
    /// Human-readable name for a source.
    #[must_use]
    pub fn name_of(&self, source: Source) -> &str {
        match source {
            Source::Pos => "POS",
            Source::PlatformA => &self.platform_a,
            Source::PlatformB => &self.platform_b,
        }
    }
}

impl Default for PlatformNames {
    fn default() -> Self {
        Self {
            platform_a: default_platform_a(),
            platform_b: default_platform_b(),
        }
    }
}

/// Opaque handle to an uploaded export file.
///
/// Only the name (and optionally the size) is known; contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size_bytes: Option<u64>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }
}

impl From<&str> for FileHandle {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A value held for each of the three sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BySource<T> {
    pub pos: T,
    pub platform_a: T,
    pub platform_b: T,
}

impl<T> BySource<T> {
    pub fn new(pos: T, platform_a: T, platform_b: T) -> Self {
        Self {
            pos,
            platform_a,
            platform_b,
        }
    }

    pub fn get(&self, source: Source) -> &T {
        match source {
            Source::Pos => &self.pos,
            Source::PlatformA => &self.platform_a,
            Source::PlatformB => &self.platform_b,
        }
    }

    pub fn get_mut(&mut self, source: Source) -> &mut T {
        match source {
            Source::Pos => &mut self.pos,
            Source::PlatformA => &mut self.platform_a,
            Source::PlatformB => &mut self.platform_b,
        }
    }
}

/// Uploaded files grouped by source.
pub type SourceFiles = BySource<Vec<FileHandle>>;

impl SourceFiles {
    /// Whether any source has at least one file.
    #[must_use]
    pub fn has_any(&self) -> bool {
        Source::ALL.iter().any(|s| !self.get(*s).is_empty())
    }

    /// Total number of files across sources.
    #[must_use]
    pub fn file_count(&self) -> usize {
        Source::ALL.iter().map(|s| self.get(*s).len()).sum()
    }
}

/// Order and revenue totals reported by one source for the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAggregate {
    pub available: bool,
    pub orders: u64,
    pub revenue: Amount,
}

impl SourceAggregate {
    /// Aggregate for a source that supplied data.
    #[must_use]
    pub fn new(orders: u64, revenue: Amount) -> Self {
        Self {
            available: true,
            orders,
            revenue,
        }
    }

    /// Aggregate for a source with no uploaded files.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            available: false,
            orders: 0,
            revenue: Decimal::ZERO,
        }
    }

    /// Orders counted toward totals; zero when the source is unavailable.
    #[must_use]
    pub fn counted_orders(&self) -> u64 {
        if self.available {
            self.orders
        } else {
            0
        }
    }

    /// Revenue counted toward totals; zero when the source is unavailable.
    #[must_use]
    pub fn counted_revenue(&self) -> Amount {
        if self.available {
            self.revenue
        } else {
            Decimal::ZERO
        }
    }
}

impl Default for SourceAggregate {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Aggregates for all three sources.
pub type SourceAggregates = BySource<SourceAggregate>;
