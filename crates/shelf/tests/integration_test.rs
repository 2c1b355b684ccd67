//! Integration tests for the shelf binary crate.
//!
//! These run both subcommands against a workbook and a site in a temporary
//! directory.

use serde_json::json;
use shelf::{run_analytics, run_metrics, AppError};
use shelf_common::test_utils::{create_temp_dir, init_test_logging, mock_timestamp};
use shelf_common::{Metrics, ShelfError};
use shelf_config::Config;
use std::fs;
use std::path::Path;

fn config_in(root: &Path) -> Config {
    let mut config = Config::default();
    config.source.workbook_path = root.join("workbook.json").display().to_string();
    config.paths.metrics_dir = root.join("metrics").display().to_string();
    config.paths.site_dir = root.join("site").display().to_string();
    config.paths.content_dir = root.join("content").display().to_string();
    config
}

fn write_workbook(root: &Path) {
    let workbook = json!({
        "sheets": {
            "articles": [
                ["Date", "Title", "Link", "Source", "Read"],
                ["2025-01-10", "Parsing in Rust", "https://example.com/a", "substack", true],
                ["2024-12-18", "Old backlog", "https://example.com/b", "github", false],
                ["2025-01-02", "Release notes", "https://example.com/c", "Stripe", "FALSE"],
                ["01/02/2025", "Bad date", "https://example.com/d", "GitHub", true],
                ["2025-01-03", "Too short"]
            ],
            "providers": [
                ["Provider", "Author"],
                ["Substack", "one"],
                ["substack", "two"],
                ["Medium", "three"]
            ]
        }
    });
    fs::write(root.join("workbook.json"), workbook.to_string()).unwrap();
}

#[tokio::test]
async fn test_metrics_then_analytics() {
    init_test_logging();
    let root = create_temp_dir();
    write_workbook(root.path());
    let config = config_in(root.path());
    let reference = mock_timestamp(2025, 1, 15, 12, 0, 0);

    let key = run_metrics(&config, reference).await.unwrap();
    assert_eq!(key.to_string(), "2025-01-15");

    let snapshot_path = root.path().join("metrics/2025-01-15.json");
    let metrics: Metrics =
        serde_json::from_str(&fs::read_to_string(&snapshot_path).unwrap()).unwrap();
    assert_eq!(metrics.total_articles, 3);
    assert_eq!((metrics.read_count, metrics.unread_count), (1, 2));
    assert_eq!(metrics.author_count(), Some(2));
    assert_eq!(metrics.by_source["GitHub"], 1);
    assert_eq!(metrics.last_updated, reference);

    let report = run_analytics(&config, reference).unwrap();
    assert_eq!(report.failed().count(), 0);
    assert!(root.path().join("site/index.html").is_file());
    assert!(root
        .path()
        .join("site/history/2025-01-15/analytics.html")
        .is_file());
}

#[tokio::test]
async fn test_metrics_without_workbook_fails() {
    let root = create_temp_dir();
    let config = config_in(root.path());

    let result = run_metrics(&config, mock_timestamp(2025, 1, 15, 0, 0, 0)).await;
    assert!(matches!(result, Err(AppError::Shelf(_))));
    assert!(!root.path().join("metrics").exists());
}

#[tokio::test]
async fn test_empty_article_sheet_fails() {
    let root = create_temp_dir();
    fs::write(
        root.path().join("workbook.json"),
        r#"{"sheets": {"articles": [], "providers": []}}"#,
    )
    .unwrap();
    let config = config_in(root.path());

    let result = run_metrics(&config, mock_timestamp(2025, 1, 15, 0, 0, 0)).await;
    assert!(matches!(result, Err(AppError::Shelf(ShelfError::EmptyInput))));
}

#[test]
fn test_analytics_without_snapshots_fails() {
    let root = create_temp_dir();
    let config = config_in(root.path());

    let result = run_analytics(&config, mock_timestamp(2025, 1, 15, 0, 0, 0));
    assert!(matches!(
        result,
        Err(AppError::Shelf(ShelfError::NoSnapshotsFound))
    ));
}
