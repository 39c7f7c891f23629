//! Trailing-year date window

use chrono::{Duration, NaiveDate};

/// Exclusive end of the trailing-year window, fixed to the dataset.
pub const TRAILING_YEAR_END: (i32, u32, u32) = (2017, 8, 20);

/// Length of the trailing-year window in days.
pub const TRAILING_YEAR_DAYS: i64 = 365;

/// ISO-8601 form used by the `measurement.date` column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open date interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window ending (exclusively) at `end` and spanning `days` days.
    pub fn ending_at(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// The fixed trailing year shared by the precipitation and tobs routes.
    pub fn trailing_year() -> Self {
        let (year, month, day) = TRAILING_YEAR_END;
        let end = NaiveDate::from_ymd_opt(year, month, day)
            .expect("TRAILING_YEAR_END must be a calendar date");
        Self::ending_at(end, TRAILING_YEAR_DAYS)
    }

    /// Inclusive lower bound as stored in the database
    pub fn start_key(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Exclusive upper bound as stored in the database
    pub fn end_key(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Whether an ISO date string falls inside the window.
    ///
    /// Compares lexically, which matches how SQLite orders the text column.
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start_key().as_str() && date < self.end_key().as_str()
    }
}
