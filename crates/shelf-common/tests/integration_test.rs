//! Integration tests for shelf-common crate.

use chrono::{TimeZone, Utc};
use shelf_common::{
    days_in_month, format_timestamp, init_logging, percentage, LoggingConfig, Result, ShelfError,
};

#[test]
fn test_format_timestamp() {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let formatted = format_timestamp(timestamp);
    assert_eq!(formatted, "2024-01-01 12:00:00 UTC");
}

#[test]
fn test_calendar_helpers() {
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(percentage(1, 4), 25.0);
}

#[test]
fn test_invalid_log_filter_is_a_config_error() {
    std::env::remove_var("RUST_LOG");
    let config = LoggingConfig {
        level: "shelf=[bogus".to_string(),
        ..LoggingConfig::default()
    };

    let result = init_logging(&config);
    assert!(matches!(result, Err(ShelfError::Config { .. })));
}

#[test]
fn test_result_alias_propagates() {
    fn inner() -> Result<u64> {
        Err(ShelfError::EmptyInput)
    }

    fn outer() -> Result<u64> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(ShelfError::EmptyInput)));
}
