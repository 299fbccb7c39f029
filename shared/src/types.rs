//! Common types used across the platform

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range, interpreted in UTC
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The `days` calendar days ending with `end` (inclusive).
    ///
    /// A zero-day window is treated as a single day.
    pub fn trailing_days(end: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        Self {
            start: end - Duration::days(span),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// First instant of the range (midnight UTC of `start`)
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// First instant after the range (midnight UTC following `end`)
    pub fn end_instant(&self) -> DateTime<Utc> {
        (self.end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc()
    }
}
