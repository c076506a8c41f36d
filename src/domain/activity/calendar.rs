//! Calendar-day arithmetic over planned date ranges.
//!
//! Planning is day-granular, so every difference here is a whole number
//! of days and needs no rounding.

use chrono::{Days, NaiveDate};

/// Signed number of days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Days elapsed since `start`; negative before the window opens.
pub fn elapsed_days(start: NaiveDate, today: NaiveDate) -> i64 {
    days_between(start, today)
}

/// Days left until `end`, never negative.
pub fn remaining_days(end: NaiveDate, today: NaiveDate) -> i64 {
    days_between(today, end).max(0)
}

/// `date` moved forward by `days`, or `None` past the calendar's range.
pub fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}
