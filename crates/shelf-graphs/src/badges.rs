//! Highlight badges computed from a snapshot.
//!
//! Every scan walks sources in ascending name order and only replaces the
//! current best on a strictly greater value, so exact ties go to the
//! alphabetically first source.

use chrono::{DateTime, Utc};
use shelf_common::{month_key, Metrics};

/// Source with the highest read ratio. Sources without articles are skipped.
///
/// `None` when no source has read anything.
pub fn top_read_rate_source(metrics: &Metrics) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for (name, status) in metrics.source_read_status() {
        let total = status.total();
        if total == 0 {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = status.read as f64 / total as f64;
        if rate > best.map_or(0.0, |(_, top)| top) {
            best = Some((name, rate));
        }
    }
    best.map(|(name, _)| name.to_string())
}

/// Source with the most unread articles, `None` when nothing is unread.
pub fn most_unread_source(metrics: &Metrics) -> Option<String> {
    let mut best: Option<(&str, u64)> = None;
    for (name, &unread) in &metrics.unread_by_source {
        if unread > best.map_or(0, |(_, top)| top) {
            best = Some((name.as_str(), unread));
        }
    }
    best.map(|(name, _)| name.to_string())
}

/// Month the "this month" badge reports on.
///
/// The reference month when the snapshot has articles in it, otherwise the
/// latest month with any articles.
pub fn badge_month(metrics: &Metrics, reference: DateTime<Utc>) -> String {
    let current = month_key(reference.date_naive());
    if metrics.by_month.contains_key(&current) {
        return current;
    }
    metrics
        .by_month
        .keys()
        .next_back()
        .cloned()
        .unwrap_or(current)
}

/// Read articles across all sources in `month` (`MM`).
pub fn this_month_articles(metrics: &Metrics, month: &str) -> u64 {
    metrics
        .by_month_and_source
        .get(month)
        .map_or(0, |sources| sources.values().map(|status| status.read).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_common::test_utils::{mock_timestamp, snapshot_fixtures};
    use shelf_common::ReadStatus;

    #[test]
    fn test_badges_on_sample() {
        let metrics = snapshot_fixtures::sample_metrics();

        assert_eq!(top_read_rate_source(&metrics).as_deref(), Some("freeCodeCamp"));
        // GitHub and Substack tie on 2 unread
        assert_eq!(most_unread_source(&metrics).as_deref(), Some("GitHub"));
        assert_eq!(this_month_articles(&metrics, "03"), 1);
        assert_eq!(this_month_articles(&metrics, "02"), 3);
        assert_eq!(this_month_articles(&metrics, "11"), 0);
    }

    #[test]
    fn test_author_count_key_is_not_a_source() {
        let mut metrics = Metrics::default();
        metrics
            .by_source_read_status
            .insert("substack_author_count".to_string(), ReadStatus::new(40, 0));
        metrics
            .by_source_read_status
            .insert("GitHub".to_string(), ReadStatus::new(1, 3));

        assert_eq!(top_read_rate_source(&metrics).as_deref(), Some("GitHub"));
    }

    #[test]
    fn test_read_rate_tie_goes_to_first_name() {
        let mut metrics = Metrics::default();
        for name in ["Stripe", "Shopify", "GitHub"] {
            metrics
                .by_source_read_status
                .insert(name.to_string(), ReadStatus::new(1, 1));
        }
        metrics
            .by_source_read_status
            .insert("Empty".to_string(), ReadStatus::new(0, 0));

        assert_eq!(top_read_rate_source(&metrics).as_deref(), Some("GitHub"));
    }

    #[test]
    fn test_empty_snapshot_has_no_badges() {
        let metrics = Metrics::default();
        assert_eq!(top_read_rate_source(&metrics), None);
        assert_eq!(most_unread_source(&metrics), None);
        assert_eq!(this_month_articles(&metrics, "01"), 0);
    }

    #[test]
    fn test_badge_month_fallback() {
        let metrics = snapshot_fixtures::sample_metrics();

        assert_eq!(badge_month(&metrics, mock_timestamp(2025, 2, 1, 0, 0, 0)), "02");
        // no July articles, latest month present is March
        assert_eq!(badge_month(&metrics, mock_timestamp(2025, 7, 1, 0, 0, 0)), "03");
        assert_eq!(
            badge_month(&Metrics::default(), mock_timestamp(2025, 7, 1, 0, 0, 0)),
            "07"
        );
    }
}
