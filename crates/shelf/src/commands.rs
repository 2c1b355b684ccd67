//! The `metrics` and `analytics` runs.

use crate::error::AppResult;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shelf_common::SnapshotKey;
use shelf_config::Config;
use shelf_metrics::{collect_snapshot, FsSnapshotStore, SnapshotStore, WorkbookSource};
use shelf_site::{HtmlRenderer, RegenerationReport, Regenerator, Timeline};
use tracing::{info, instrument};

/// Calendar date of `reference` in the report timezone.
pub fn snapshot_key(reference: DateTime<Utc>, timezone: Tz) -> SnapshotKey {
    SnapshotKey(reference.with_timezone(&timezone).date_naive())
}

/// Aggregate the configured workbook and store the result under today's key.
#[instrument(skip(config))]
pub async fn run_metrics(config: &Config, reference: DateTime<Utc>) -> AppResult<SnapshotKey> {
    let source = WorkbookSource::new(&config.source.workbook_path).with_sheets(
        config.source.articles_sheet.clone(),
        config.source.providers_sheet.clone(),
    );
    let metrics = collect_snapshot(&source, reference).await?;

    let key = snapshot_key(reference, config.timezone());
    let store = FsSnapshotStore::new(config.metrics_dir());
    store.write(key, &metrics)?;

    info!(
        %key,
        total = metrics.total_articles,
        read_rate = metrics.read_rate,
        "Saved metrics snapshot"
    );
    Ok(key)
}

/// Rebuild the site and its history from every stored snapshot.
#[instrument(skip(config))]
pub fn run_analytics(config: &Config, reference: DateTime<Utc>) -> AppResult<RegenerationReport> {
    let store = FsSnapshotStore::new(config.metrics_dir());
    let renderer = HtmlRenderer::new(&config.report.title)
        .with_accent_color(&config.report.accent_color)
        .with_timeline(Timeline::load_or_default(&config.content_dir()));

    let report = Regenerator::new(config.site_dir()).run(&store, &renderer, reference)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_common::test_utils::mock_timestamp;

    #[test]
    fn test_snapshot_key_uses_report_timezone() {
        let late_evening = mock_timestamp(2025, 1, 15, 23, 30, 0);

        assert_eq!(snapshot_key(late_evening, Tz::UTC).to_string(), "2025-01-15");
        assert_eq!(
            snapshot_key(late_evening, chrono_tz::Asia::Tokyo).to_string(),
            "2025-01-16"
        );
        assert_eq!(
            snapshot_key(mock_timestamp(2025, 1, 15, 3, 0, 0), chrono_tz::America::New_York)
                .to_string(),
            "2025-01-14"
        );
    }
}
