//! Unread article age buckets.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use shelf_common::AgeBucket;

/// Average days per month.
pub const DAYS_PER_MONTH: f64 = 30.44;
/// Average days per year.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Days from midnight UTC of `date` to `reference`, fractional.
#[allow(clippy::cast_precision_loss)]
pub fn age_in_days(date: NaiveDate, reference: DateTime<Utc>) -> f64 {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (reference - start).num_seconds() as f64 / 86_400.0
}

/// Bucket of an article dated `date` as seen at `reference`.
///
/// Future dates land in the youngest bucket.
pub fn classify(date: NaiveDate, reference: DateTime<Utc>) -> AgeBucket {
    let days = age_in_days(date, reference);
    if days <= 0.0 {
        return AgeBucket::LessThanOneMonth;
    }

    let months = days / DAYS_PER_MONTH;
    if days / DAYS_PER_YEAR >= 1.0 {
        AgeBucket::OlderThanOneYear
    } else if months >= 6.0 {
        AgeBucket::SixToTwelveMonths
    } else if months >= 3.0 {
        AgeBucket::ThreeToSixMonths
    } else if months >= 1.0 {
        AgeBucket::OneToThreeMonths
    } else {
        AgeBucket::LessThanOneMonth
    }
}
