//! Test utilities and shared test helpers for Shelf.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a mock timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Test fixture for creating a calendar date.
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Raw sheet rows for engine and source tests.
pub mod row_fixtures {
    /// Header row of the articles sheet.
    pub fn header() -> Vec<String> {
        ["date", "title", "link", "category", "read"]
            .iter()
            .map(|cell| (*cell).to_string())
            .collect()
    }

    /// A five cell article row.
    pub fn row(date: &str, title: &str, source: &str, read: &str) -> Vec<String> {
        vec![
            date.to_string(),
            title.to_string(),
            format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
            source.to_string(),
            read.to_string(),
        ]
    }

    /// Ten articles over 2024-2025, three read, sources `A,A,A,B,B,C,C,D,E,E`.
    /// The oldest unread article is dated 2024-12-18.
    pub fn scenario_rows() -> Vec<Vec<String>> {
        vec![
            header(),
            row("2024-11-02", "Alpha One", "A", "TRUE"),
            row("2024-12-18", "Alpha Two", "A", "FALSE"),
            row("2025-01-05", "Alpha Three", "A", "FALSE"),
            row("2024-11-20", "Beta One", "B", "true"),
            row("2025-02-10", "Beta Two", "B", "FALSE"),
            row("2025-03-01", "Gamma One", "C", "FALSE"),
            row("2025-01-20", "Gamma Two", "C", "TRUE"),
            row("2025-04-12", "Delta One", "D", ""),
            row("2025-02-14", "Epsilon One", "E", "FALSE"),
            row("2025-05-30", "Epsilon Two", "E", "False"),
        ]
    }

    /// Providers sheet with two Substack authors.
    pub fn provider_rows() -> Vec<Vec<String>> {
        vec![
            vec!["provider".to_string(), "url".to_string()],
            vec!["Substack".to_string(), "https://a.substack.com".to_string()],
            vec!["substack".to_string(), "https://b.substack.com".to_string()],
            vec!["GitHub".to_string(), "https://github.blog".to_string()],
            vec![],
        ]
    }
}

/// Hand-built snapshots for projection and rendering tests.
pub mod snapshot_fixtures {
    use super::mock_timestamp;
    use crate::types::{ArticleMeta, Metrics, ReadStatus, SourceMeta, AUTHOR_COUNT_KEY};
    use std::collections::BTreeMap;

    fn counts(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
        entries
            .iter()
            .map(|(key, count)| ((*key).to_string(), *count))
            .collect()
    }

    fn statuses(entries: &[(&str, u64, u64)]) -> BTreeMap<String, ReadStatus> {
        entries
            .iter()
            .map(|(key, read, unread)| ((*key).to_string(), ReadStatus::new(*read, *unread)))
            .collect()
    }

    fn unread(title: &str, date: &str, category: &str) -> ArticleMeta {
        ArticleMeta {
            title: title.to_string(),
            date: date.to_string(),
            link: format!("https://example.com/{date}"),
            category: category.to_string(),
            read: false,
        }
    }

    /// A consistent ten article snapshot over three sources and two years.
    ///
    /// Substack 5 (3 read), GitHub 3 (1 read), freeCodeCamp 2 (2 read);
    /// months 01..03 only; twelve Substack authors; last updated 2025-03-20.
    pub fn sample_metrics() -> Metrics {
        let per_source = statuses(&[
            ("GitHub", 1, 2),
            ("Substack", 3, 2),
            ("freeCodeCamp", 2, 0),
        ]);
        let mut by_source_read_status = per_source.clone();
        by_source_read_status.insert(AUTHOR_COUNT_KEY.to_string(), ReadStatus::new(12, 0));

        let mut by_month_and_source = BTreeMap::new();
        by_month_and_source.insert("01".to_string(), statuses(&[("Substack", 2, 0), ("GitHub", 0, 1)]));
        by_month_and_source.insert(
            "02".to_string(),
            statuses(&[("Substack", 1, 1), ("freeCodeCamp", 2, 0)]),
        );
        by_month_and_source.insert("03".to_string(), statuses(&[("Substack", 0, 1), ("GitHub", 1, 1)]));

        let mut by_year_and_month = BTreeMap::new();
        by_year_and_month.insert("2024".to_string(), counts(&[("01", 1), ("02", 3)]));
        by_year_and_month.insert("2025".to_string(), counts(&[("01", 2), ("02", 1), ("03", 3)]));

        let top = vec![
            unread("Old Issue", "2024-01-10", "GitHub"),
            unread("Weekly Letter", "2024-02-03", "Substack"),
            unread("Release Notes", "2025-03-02", "GitHub"),
        ];

        let source_metadata = [("freeCodeCamp", "initial"), ("Substack", "initial"), ("GitHub", "2024-03-18")]
            .iter()
            .map(|(name, added)| {
                (
                    (*name).to_string(),
                    SourceMeta {
                        added: (*added).to_string(),
                    },
                )
            })
            .collect();

        Metrics {
            total_articles: 10,
            by_source: counts(&[("GitHub", 3), ("Substack", 5), ("freeCodeCamp", 2)]),
            by_source_read_status,
            by_year: counts(&[("2024", 4), ("2025", 6)]),
            by_month: counts(&[("01", 3), ("02", 4), ("03", 3)]),
            by_year_and_month,
            by_month_and_source,
            by_category: per_source,
            by_category_and_source: BTreeMap::new(),
            read_unread_totals: ReadStatus::new(6, 4),
            unread_by_month: counts(&[("01", 1), ("02", 1), ("03", 2)]),
            unread_by_category: counts(&[("GitHub", 2), ("Substack", 2)]),
            unread_by_source: counts(&[("GitHub", 2), ("Substack", 2)]),
            unread_by_year: counts(&[("2024", 1), ("2025", 3)]),
            unread_article_age_distribution: counts(&[
                ("less_than_1_month", 1),
                ("1_to_3_months", 1),
                ("older_than_1year", 2),
            ]),
            oldest_unread_article: top.first().cloned(),
            top_oldest_unread_articles: top,
            source_metadata,
            read_count: 6,
            unread_count: 4,
            read_rate: 60.0,
            avg_articles_per_month: 2.5,
            last_updated: mock_timestamp(2025, 3, 20, 8, 0, 0),
            ai_summary: None,
            articles: Vec::new(),
        }
    }
}

/// Property-based testing utilities using proptest.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for ISO dates between 2020-01-01 and 2026-12-28.
    pub fn iso_date_strategy() -> impl Strategy<Value = String> {
        (2020i32..=2026, 1u32..=12, 1u32..=28)
            .prop_map(|(year, month, day)| format!("{year:04}-{month:02}-{day:02}"))
    }

    /// Strategy for source cells, mixing canonical, odd-case and unknown names.
    pub fn source_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("substack".to_string()),
            Just("GITHUB".to_string()),
            Just("freeCodeCamp".to_string()),
            Just("Shopify".to_string()),
            Just("Indie Blog".to_string()),
        ]
    }

    /// Strategy for read flag cells, including near misses of the accepted literals.
    pub fn read_flag_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("TRUE".to_string()),
            Just("true".to_string()),
            Just("FALSE".to_string()),
            Just("True".to_string()),
            Just(String::new()),
        ]
    }

    /// Strategy for one well formed article row.
    pub fn valid_row_strategy() -> impl Strategy<Value = Vec<String>> {
        (iso_date_strategy(), "[a-z]{3,12}", source_strategy(), read_flag_strategy()).prop_map(
            |(date, title, source, read)| {
                vec![date, title.clone(), format!("https://example.com/{title}"), source, read]
            },
        )
    }

    /// Strategy for a row that the normalizer must reject.
    pub fn invalid_row_strategy() -> impl Strategy<Value = Vec<String>> {
        prop_oneof![
            (iso_date_strategy(), "[a-z]{3,12}")
                .prop_map(|(date, title)| vec![date, title, "https://example.com".to_string()]),
            ("[0-9]{2}/[0-9]{2}/[0-9]{4}", source_strategy()).prop_map(|(date, source)| {
                vec![date, "title".to_string(), "link".to_string(), source, "TRUE".to_string()]
            }),
        ]
    }
}
