//! Cross-map consistency of aggregated snapshots over random row sets.

use proptest::prelude::*;
use shelf_common::test_utils::property_testing::{invalid_row_strategy, valid_row_strategy};
use shelf_common::test_utils::{mock_timestamp, row_fixtures};
use shelf_common::Metrics;
use shelf_metrics::{aggregate, normalize_row};

fn with_header(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut all = vec![row_fixtures::header()];
    all.extend(rows);
    all
}

fn sum(map: &std::collections::BTreeMap<String, u64>) -> u64 {
    map.values().sum()
}

fn check_invariants(metrics: &Metrics) {
    assert_eq!(
        metrics.read_count + metrics.unread_count,
        metrics.total_articles
    );
    for (source, status) in metrics.source_read_status() {
        assert_eq!(status.total(), metrics.by_source[source], "source {source}");
    }
    assert_eq!(sum(&metrics.by_source), metrics.total_articles);
    assert_eq!(sum(&metrics.by_year), metrics.total_articles);
    assert_eq!(sum(&metrics.by_month), metrics.total_articles);

    assert_eq!(sum(&metrics.unread_article_age_distribution), metrics.unread_count);
    assert_eq!(sum(&metrics.unread_by_year), metrics.unread_count);
    assert_eq!(sum(&metrics.unread_by_month), metrics.unread_count);
    assert_eq!(sum(&metrics.unread_by_category), metrics.unread_count);
    assert_eq!(sum(&metrics.unread_by_source), metrics.unread_count);

    let top = &metrics.top_oldest_unread_articles;
    let expected_len = usize::try_from(metrics.unread_count.min(3)).unwrap();
    assert_eq!(top.len(), expected_len);
    assert!(top.windows(2).all(|pair| pair[0].date <= pair[1].date));
    assert!(top.iter().all(|article| !article.read));
    assert_eq!(metrics.oldest_unread_article.as_ref(), top.first());
}

proptest! {
    #[test]
    fn aggregates_are_consistent(rows in prop::collection::vec(valid_row_strategy(), 0..60)) {
        let metrics = aggregate(&with_header(rows.clone()), 3, mock_timestamp(2026, 6, 1, 0, 0, 0)).unwrap();

        prop_assert_eq!(metrics.total_articles, rows.len() as u64);
        check_invariants(&metrics);
        prop_assert!(metrics.avg_articles_per_month <= metrics.total_articles as f64);
    }

    #[test]
    fn rejected_rows_change_nothing(
        valid in prop::collection::vec(valid_row_strategy(), 1..30),
        invalid in prop::collection::vec(invalid_row_strategy(), 1..10),
    ) {
        let reference = mock_timestamp(2026, 6, 1, 0, 0, 0);
        let clean = aggregate(&with_header(valid.clone()), 0, reference).unwrap();

        for row in &invalid {
            prop_assert!(normalize_row(row).is_err());
        }
        let mut noisy_rows = valid;
        noisy_rows.extend(invalid);
        let noisy = aggregate(&with_header(noisy_rows), 0, reference).unwrap();

        prop_assert_eq!(noisy, clean);
    }
}

#[test]
fn scenario_matches_expected_totals() {
    let metrics = aggregate(
        &row_fixtures::scenario_rows(),
        0,
        mock_timestamp(2025, 6, 20, 0, 0, 0),
    )
    .unwrap();

    assert_eq!(metrics.total_articles, 10);
    assert!((metrics.read_rate - 30.0).abs() < 1e-9);
    assert_eq!(
        metrics
            .oldest_unread_article
            .as_ref()
            .map(|article| article.date.as_str()),
        Some("2024-12-18")
    );
    assert_eq!(metrics.unread_by_year["2024"] + metrics.unread_by_year["2025"], 7);
    check_invariants(&metrics);
}
