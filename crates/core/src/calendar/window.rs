use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::WindowError;

/// A half-open query window `[start, end)` over naive local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl QueryWindow {
    /// Creates a window, validating that `end` does not precede `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, WindowError> {
        if end < start {
            return Err(WindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Creates the window covering an entire month.
    ///
    /// # Panics
    /// Panics if the year/month combination is invalid.
    pub fn month(year: i32, month: u32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .expect("Invalid year/month for QueryWindow::month");

        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .expect("Invalid year/month for QueryWindow::month end calculation");

        Self {
            start: start.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
            end: end.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
        }
    }

    /// Creates the window covering the ISO week containing the given date.
    ///
    /// ISO weeks start on Monday; the window ends at the following Monday.
    pub fn week(date: NaiveDate) -> Self {
        let days_from_monday = date.weekday().num_days_from_monday();
        let monday = date - chrono::Duration::days(days_from_monday as i64);
        let next_monday = monday + chrono::Duration::days(7);

        Self {
            start: monday.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
            end: next_monday
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always valid"),
        }
    }

    /// True when `[start, end)` intersects this window.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }
}
