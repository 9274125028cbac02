//! Tweets: the persisted post records and their query types.

pub mod routes;
pub mod storage;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored tweet. Immutable once written; there is no update or delete path.
///
/// `tags` is always the extraction of `text` at write time, and `created_at`
/// comes from the store's clock, never from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tweet {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// An inclusive `[from, to]` instant range for trend counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Rejected trend-range input.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TrendRangeError {
    #[error("invalid year {0:?}")]
    InvalidYear(String),

    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
}

impl TrendRange {
    /// Range between two explicit instants, both inclusive.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Legacy year-boundary convenience: expands `from_year..=to_year` to full
    /// calendar years in UTC, Jan 1 00:00:00.000 through Dec 31 23:59:59.999.
    ///
    /// An inverted range is not an error; it simply matches nothing.
    pub fn calendar_years(from_year: i32, to_year: i32) -> Result<Self, TrendRangeError> {
        let from = NaiveDate::from_ymd_opt(from_year, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(TrendRangeError::YearOutOfRange(from_year))?;
        let to = NaiveDate::from_ymd_opt(to_year, 12, 31)
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
            .ok_or(TrendRangeError::YearOutOfRange(to_year))?;

        Ok(Self {
            from: from.and_utc(),
            to: to.and_utc(),
        })
    }

    /// Parse raw year path segments into a calendar-year range.
    pub fn parse_years(from: &str, to: &str) -> Result<Self, TrendRangeError> {
        let from_year: i32 = from
            .parse()
            .map_err(|_| TrendRangeError::InvalidYear(from.to_owned()))?;
        let to_year: i32 = to
            .parse()
            .map_err(|_| TrendRangeError::InvalidYear(to.to_owned()))?;

        Self::calendar_years(from_year, to_year)
    }

    /// Whether `instant` falls within the range, boundaries included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}
