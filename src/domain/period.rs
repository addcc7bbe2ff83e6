//! Reporting periods and their human-readable labels.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of the window a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

/// Returned when a period name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown report period '{0}' (expected daily, weekly or monthly)")]
pub struct ParsePeriodError(String);

impl ReportPeriod {
    /// Number of days in the synthesized daily series.
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Header label for a report generated on `today`.
    ///
    /// Daily reports name the day, weekly reports the Sunday-to-Saturday
    /// week containing `today`, monthly reports the calendar month.
    #[must_use]
    pub fn label(self, today: NaiveDate) -> String {
        match self {
            Self::Daily => today.format("%B %-d, %Y").to_string(),
            Self::Weekly => {
                let offset = i64::from(today.weekday().num_days_from_sunday());
                let start = today - Duration::days(offset);
                let end = start + Duration::days(6);
                format!("{} to {}", start.format("%-m/%-d/%Y"), end.format("%-m/%-d/%Y"))
            }
            Self::Monthly => today.format("%B %Y").to_string(),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}
