//! Aggregation engine: folds sheet rows into one [`Metrics`] snapshot.
//!
//! All state lives in a [`MetricsAccumulator`] that is threaded through a
//! single pass over the rows and consumed once at the end. The reference
//! instant is captured by the caller and used for every age comparison of
//! the run.

use crate::ages;
use crate::normalizer::{self, ParsedArticle, RowError, SOURCE_ADDED};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use shelf_common::{
    days_in_month, month_key, percentage, year_key, ArticleMeta, Metrics, ReadStatus, Result,
    ShelfError, SourceMeta, AUTHOR_COUNT_KEY, TOP_UNREAD_ARTICLES_COUNT,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Running state of one aggregation pass.
#[derive(Debug)]
pub struct MetricsAccumulator {
    reference: DateTime<Utc>,
    metrics: Metrics,
    earliest: Option<NaiveDate>,
    latest: Option<NaiveDate>,
    unread: Vec<(NaiveDate, ArticleMeta)>,
    skipped: usize,
}

impl MetricsAccumulator {
    /// Start an empty pass against `reference`.
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self {
            reference,
            metrics: Metrics::default(),
            earliest: None,
            latest: None,
            unread: Vec::new(),
            skipped: 0,
        }
    }

    /// Count one data row.
    ///
    /// A row that does not normalize is counted as skipped and leaves
    /// every aggregate untouched.
    pub fn push_row<S: AsRef<str>>(&mut self, row: &[S]) -> std::result::Result<(), RowError> {
        let parsed = match normalizer::normalize_row(row) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.skipped += 1;
                return Err(err);
            }
        };
        let meta = if parsed.is_read {
            None
        } else {
            normalizer::article_meta(row).ok()
        };
        self.record(&parsed, meta);
        Ok(())
    }

    /// Rows rejected so far.
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Articles counted so far.
    pub const fn counted(&self) -> u64 {
        self.metrics.total_articles
    }

    fn record(&mut self, article: &ParsedArticle, meta: Option<ArticleMeta>) {
        let m = &mut self.metrics;
        let year = year_key(article.date);
        let month = month_key(article.date);
        let source = article.category.as_str();

        m.total_articles += 1;

        self.earliest = Some(self.earliest.map_or(article.date, |d| d.min(article.date)));
        self.latest = Some(self.latest.map_or(article.date, |d| d.max(article.date)));

        *m.by_year.entry(year.clone()).or_default() += 1;
        *m.by_month.entry(month.clone()).or_default() += 1;
        *m.by_year_and_month
            .entry(year.clone())
            .or_default()
            .entry(month.clone())
            .or_default() += 1;
        m.by_month_and_source
            .entry(month.clone())
            .or_default()
            .entry(source.to_string())
            .or_default()
            .record(article.is_read);

        *m.by_source.entry(source.to_string()).or_default() += 1;

        m.by_category
            .entry(source.to_string())
            .or_default()
            .record(article.is_read);
        m.by_category_and_source
            .entry(source.to_string())
            .or_default()
            .entry(source.to_string())
            .or_default()
            .record(article.is_read);

        if article.is_read {
            m.read_count += 1;
        } else {
            m.unread_count += 1;
        }
        m.by_source_read_status
            .entry(source.to_string())
            .or_default()
            .record(article.is_read);

        if !article.is_read {
            *m.unread_by_month.entry(month).or_default() += 1;
            *m.unread_by_year.entry(year).or_default() += 1;
            *m.unread_by_category.entry(source.to_string()).or_default() += 1;
            *m.unread_by_source.entry(source.to_string()).or_default() += 1;

            let bucket = ages::classify(article.date, self.reference);
            *m.unread_article_age_distribution
                .entry(bucket.key().to_string())
                .or_default() += 1;

            if let Some(meta) = meta {
                self.unread.push((article.date, meta));
            }
        }
    }

    /// Close the pass and derive rates, averages and selections.
    pub fn finish(self, author_count: u64) -> Metrics {
        let Self {
            reference,
            mut metrics,
            earliest,
            latest,
            mut unread,
            skipped,
        } = self;

        metrics.read_unread_totals = ReadStatus::new(metrics.read_count, metrics.unread_count);
        metrics.read_rate = percentage(metrics.read_count, metrics.total_articles);

        let span = match (earliest, latest) {
            (Some(earliest), Some(latest)) => {
                let span = months_span(earliest, latest, reference);
                debug!(%earliest, %latest, months = span, "Data span");
                span
            }
            _ => 1.0,
        };
        #[allow(clippy::cast_precision_loss)]
        let total = metrics.total_articles as f64;
        metrics.avg_articles_per_month = total / span;

        // stable: equal dates keep row order
        unread.sort_by_key(|(date, _)| *date);
        unread.truncate(TOP_UNREAD_ARTICLES_COUNT);
        metrics.top_oldest_unread_articles = unread.into_iter().map(|(_, meta)| meta).collect();
        metrics.oldest_unread_article = metrics.top_oldest_unread_articles.first().cloned();

        metrics.by_source_read_status.insert(
            AUTHOR_COUNT_KEY.to_string(),
            ReadStatus::new(author_count, 0),
        );
        metrics.source_metadata = SOURCE_ADDED
            .iter()
            .map(|(name, added)| {
                (
                    (*name).to_string(),
                    SourceMeta {
                        added: (*added).to_string(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        metrics.last_updated = reference;

        info!(
            total = metrics.total_articles,
            read = metrics.read_count,
            unread = metrics.unread_count,
            skipped,
            "Aggregated reading list"
        );
        metrics
    }
}

/// Months covered by `earliest..=latest`.
///
/// When `latest` falls in the reference month only the elapsed fraction of
/// that month counts. Never below 1.
pub fn months_span(earliest: NaiveDate, latest: NaiveDate, reference: DateTime<Utc>) -> f64 {
    let diff = f64::from(latest.year() - earliest.year()) * 12.0 + f64::from(latest.month())
        - f64::from(earliest.month());
    let today = reference.date_naive();

    let span = if latest.year() == today.year() && latest.month() == today.month() {
        diff + f64::from(today.day()) / f64::from(days_in_month(today.year(), today.month()))
    } else {
        diff + 1.0
    };
    span.max(1.0)
}

/// Aggregate a whole articles sheet, header row first.
///
/// Fails only when the sheet has no rows at all. Rejected data rows are
/// skipped and logged at debug level.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn aggregate<S: AsRef<str>>(
    rows: &[Vec<S>],
    author_count: u64,
    reference: DateTime<Utc>,
) -> Result<Metrics> {
    if rows.is_empty() {
        return Err(ShelfError::EmptyInput);
    }

    let mut acc = MetricsAccumulator::new(reference);
    for (index, row) in rows.iter().enumerate().skip(1) {
        if let Err(err) = acc.push_row(row) {
            debug!(row = index + 1, %err, "Skipping row");
        }
    }
    Ok(acc.finish(author_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_common::test_utils::{assert_approx_eq, mock_date, mock_timestamp, row_fixtures};
    use shelf_common::AgeBucket;

    fn rows(data: &[[&str; 5]]) -> Vec<Vec<String>> {
        let mut out = vec![row_fixtures::header()];
        out.extend(
            data.iter()
                .map(|r| r.iter().map(|c| (*c).to_string()).collect()),
        );
        out
    }

    #[test]
    fn test_empty_sheet_is_an_error() {
        let empty: Vec<Vec<String>> = Vec::new();
        let result = aggregate(&empty, 0, mock_timestamp(2025, 1, 1, 0, 0, 0));
        assert!(matches!(result, Err(ShelfError::EmptyInput)));
    }

    #[test]
    fn test_header_only_sheet_gives_zero_snapshot() {
        let reference = mock_timestamp(2025, 1, 1, 0, 0, 0);
        let metrics = aggregate(&vec![row_fixtures::header()], 4, reference).unwrap();

        assert_eq!(metrics.total_articles, 0);
        assert_eq!(metrics.read_rate, 0.0);
        assert_eq!(metrics.avg_articles_per_month, 0.0);
        assert!(metrics.oldest_unread_article.is_none());
        assert_eq!(metrics.author_count(), Some(4));
        assert_eq!(metrics.last_updated, reference);
    }

    #[test]
    fn test_scenario_rows() {
        let reference = mock_timestamp(2025, 6, 15, 9, 0, 0);
        let metrics = aggregate(&row_fixtures::scenario_rows(), 0, reference).unwrap();

        assert_eq!(metrics.total_articles, 10);
        assert_eq!(metrics.read_count, 3);
        assert_eq!(metrics.unread_count, 7);
        assert_approx_eq(metrics.read_rate, 30.0, 1e-9);
        assert_eq!(
            metrics.oldest_unread_article.as_ref().map(|a| a.date.as_str()),
            Some("2024-12-18")
        );
        assert_eq!(metrics.unread_by_year["2024"], 1);
        assert_eq!(metrics.unread_by_year["2025"], 6);
        assert_eq!(metrics.by_source["A"], 3);
        assert_eq!(metrics.by_source_read_status["A"], ReadStatus::new(1, 2));
        assert_eq!(metrics.by_source_read_status["D"], ReadStatus::new(0, 1));
    }

    #[test]
    fn test_invalid_rows_contribute_nothing() {
        let mut data = rows(&[
            ["2025-01-10", "Good", "l", "GitHub", "TRUE"],
            ["10/01/2025", "Bad date", "l", "GitHub", "FALSE"],
        ]);
        data.push(vec!["2025-01-11".to_string(), "Short".to_string(), "l".to_string()]);
        let metrics = aggregate(&data, 0, mock_timestamp(2025, 2, 1, 0, 0, 0)).unwrap();

        assert_eq!(metrics.total_articles, 1);
        assert_eq!(metrics.by_source["GitHub"], 1);
        assert_eq!(metrics.unread_count, 0);
        assert!(metrics.unread_by_month.is_empty());
        assert!(metrics.top_oldest_unread_articles.is_empty());
    }

    #[test]
    fn test_top_unread_is_stable_on_equal_dates() {
        let data = rows(&[
            ["2025-03-01", "Third", "l", "GitHub", "FALSE"],
            ["2025-01-01", "First", "l", "GitHub", "FALSE"],
            ["2025-01-01", "Second", "l", "Stripe", "FALSE"],
            ["2024-12-31", "Read one", "l", "GitHub", "TRUE"],
            ["2025-01-01", "Fourth", "l", "Shopify", "FALSE"],
        ]);
        let metrics = aggregate(&data, 0, mock_timestamp(2025, 4, 1, 0, 0, 0)).unwrap();

        let titles: Vec<_> = metrics
            .top_oldest_unread_articles
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, ["First", "Second", "Fourth"]);
        assert_eq!(metrics.oldest_unread_article.unwrap().title, "First");
    }

    #[test]
    fn test_age_distribution_uses_reference() {
        let data = rows(&[
            ["2025-05-20", "Fresh", "l", "GitHub", "FALSE"],
            ["2025-03-01", "Months", "l", "GitHub", "FALSE"],
            ["2023-01-01", "Ancient", "l", "GitHub", "FALSE"],
            ["2023-01-01", "Read", "l", "GitHub", "TRUE"],
        ]);
        let metrics = aggregate(&data, 0, mock_timestamp(2025, 6, 1, 0, 0, 0)).unwrap();
        let dist = &metrics.unread_article_age_distribution;

        assert_eq!(dist[AgeBucket::LessThanOneMonth.key()], 1);
        assert_eq!(dist[AgeBucket::ThreeToSixMonths.key()], 1);
        assert_eq!(dist[AgeBucket::OlderThanOneYear.key()], 1);
        assert_eq!(dist.values().sum::<u64>(), 3);
    }

    #[test]
    fn test_single_day_average_equals_total() {
        let data = rows(&[
            ["2024-02-10", "a", "l", "GitHub", "FALSE"],
            ["2024-02-10", "b", "l", "GitHub", "TRUE"],
            ["2024-02-10", "c", "l", "Stripe", "TRUE"],
        ]);

        let elsewhere = aggregate(&data, 0, mock_timestamp(2025, 6, 1, 0, 0, 0)).unwrap();
        assert_approx_eq(elsewhere.avg_articles_per_month, 3.0, 1e-9);

        let same_month = aggregate(&data, 0, mock_timestamp(2024, 2, 10, 0, 0, 0)).unwrap();
        assert_approx_eq(same_month.avg_articles_per_month, 3.0, 1e-9);
    }

    #[test]
    fn test_months_span() {
        let reference = mock_timestamp(2025, 4, 15, 0, 0, 0);

        // Jan..Mar 2025, reference month not involved
        assert_approx_eq(
            months_span(mock_date(2025, 1, 3), mock_date(2025, 3, 9), reference),
            3.0,
            1e-9,
        );
        // Jan..Apr 2025, April half elapsed
        assert_approx_eq(
            months_span(mock_date(2025, 1, 3), mock_date(2025, 4, 2), reference),
            3.5,
            1e-9,
        );
        // across a year boundary
        assert_approx_eq(
            months_span(mock_date(2024, 11, 1), mock_date(2025, 2, 1), reference),
            4.0,
            1e-9,
        );
    }

    #[test]
    fn test_author_count_and_metadata() {
        let data = rows(&[["2025-01-10", "a", "l", "substack", "TRUE"]]);
        let metrics = aggregate(&data, 7, mock_timestamp(2025, 2, 1, 0, 0, 0)).unwrap();

        assert_eq!(
            metrics.by_source_read_status[AUTHOR_COUNT_KEY],
            ReadStatus::new(7, 0)
        );
        assert_eq!(metrics.source_read_status().count(), 1);
        assert_eq!(metrics.source_metadata["GitHub"].added, "2024-03-18");
        assert_eq!(metrics.source_metadata["Substack"].added, "initial");
        assert_eq!(metrics.by_category["Substack"], ReadStatus::new(1, 0));
        assert_eq!(
            metrics.by_category_and_source["Substack"]["Substack"],
            ReadStatus::new(1, 0)
        );
    }

    #[test]
    fn test_accumulator_counts_skips() {
        let mut acc = MetricsAccumulator::new(mock_timestamp(2025, 1, 1, 0, 0, 0));
        assert!(acc.push_row(&["2025-01-01", "t", "l", "GitHub", "TRUE"]).is_ok());
        assert!(acc.push_row(&["2025-01-01", "t"]).is_err());
        assert_eq!(acc.counted(), 1);
        assert_eq!(acc.skipped(), 1);
    }
}
