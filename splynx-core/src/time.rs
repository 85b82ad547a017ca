//! Reference-date helpers.
//!
//! Dates are compared on the local wall-clock calendar, no timezone
//! normalization: a timestamp is "on" a date when its first ten characters
//! spell that date as `YYYY-MM-DD`.

use anyhow::Result;
use chrono::{Days, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today on the host's local calendar.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The day before `today`.
pub fn yesterday(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

/// Format a date as `YYYY-MM-DD`.
pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date given on the command line.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| anyhow::anyhow!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

/// Date portion of an ISO-8601 timestamp, if it has one.
pub fn date_part(timestamp: &str) -> Option<&str> {
    timestamp.get(..10)
}

/// Whether `timestamp` falls on `date`, ignoring the time of day.
pub fn is_on_date(timestamp: &str, date: NaiveDate) -> bool {
    date_part(timestamp) == Some(date_label(date).as_str())
}
