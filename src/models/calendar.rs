//! Working-day calendar.
//!
//! Counts business days between dates for due-date evaluation.
//!
//! # Day Model
//! A date is a working day iff:
//! - It falls on Monday through Friday, AND
//! - It is NOT listed as a holiday.
//!
//! # Counting Convention
//! `business_days_between(start, end)` counts working days in the half-open
//! range `[start, end)`. When `end < start` the count of `[end, start)` is
//! returned negated, so overdue jobs yield negative slack.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Business-day calendar (weekends plus optional holidays excluded).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    /// Non-working dates in addition to weekends.
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
}

impl WorkCalendar {
    /// Creates a weekends-only calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday.
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Adds several holidays.
    pub fn with_holidays(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(dates);
        self
    }

    /// Whether `date` is a working day.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.holidays.contains(&date)
    }

    /// Signed number of working days in `[start, end)`.
    pub fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        if end >= start {
            self.count_forward(start, end)
        } else {
            -self.count_forward(end, start)
        }
    }

    /// Working days in `[start, end)`, `start <= end`.
    fn count_forward(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let span = (end - start).num_days();
        let weeks = span / 7;
        let mut count = weeks * 5;

        // Whole weeks always hold five weekdays; walk the remainder.
        let mut day = start + Duration::days(weeks * 7);
        while day < end {
            if !is_weekend(day) {
                count += 1;
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        let holidays = self
            .holidays
            .range(start..end)
            .filter(|d| !is_weekend(**d))
            .count() as i64;

        count - holidays
    }
}

#[inline]
fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
