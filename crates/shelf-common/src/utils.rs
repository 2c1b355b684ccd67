//! Shared date and formatting helpers.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Formats a timestamp for display.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Four digit year key, e.g. `"2025"`.
pub fn year_key(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

/// Zero padded month key, e.g. `"03"`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%m").to_string()
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
