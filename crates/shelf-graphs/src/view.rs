//! Presentation view of one snapshot.

use crate::badges;
use crate::charts::ChartPayloads;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shelf_common::{percentage, ArticleMeta, Metrics, Result, AUTHOR_TRACKED_SOURCE};
use std::collections::BTreeMap;
use tracing::debug;

/// Short month names, January first.
pub const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Shown in place of a badge that has no winner.
pub const NO_BADGE: &str = "N/A";

/// Per-source summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    /// Source name.
    pub name: String,
    /// Articles from this source.
    pub count: u64,
    /// Read articles.
    pub read: u64,
    /// Unread articles.
    pub unread: u64,
    /// Read share in percent.
    pub read_pct: f64,
    /// Known author count, for the tracked source only.
    pub author_count: Option<u64>,
}

impl SourceInfo {
    /// Articles per author, when the author count is known.
    #[allow(clippy::cast_precision_loss)]
    pub fn per_author(&self) -> Option<f64> {
        self.author_count
            .filter(|&authors| authors > 0)
            .map(|authors| self.count as f64 / authors as f64)
    }
}

/// Articles in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearInfo {
    /// `YYYY`
    pub year: String,
    /// Article count.
    pub count: u64,
}

/// Articles in one calendar month, all years combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthInfo {
    /// Short month name.
    pub name: String,
    /// `MM`
    pub month: String,
    /// Always empty for the combined view.
    pub year: String,
    /// Article count.
    pub total: u64,
    /// source -> article count
    pub sources: BTreeMap<String, u64>,
}

/// One headline number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyMetric {
    /// Caption.
    pub title: String,
    /// Formatted value.
    pub value: String,
}

/// Render-ready projection of one [`Metrics`] snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// Headline numbers.
    pub key_metrics: Vec<KeyMetric>,
    /// Badges.
    pub highlight_metrics: Vec<KeyMetric>,
    /// Articles counted.
    pub total_articles: u64,
    /// Read articles.
    pub read_count: u64,
    /// Unread articles.
    pub unread_count: u64,
    /// Read share in percent.
    pub read_rate: f64,
    /// Articles per month.
    pub avg_articles_per_month: f64,
    /// When the snapshot was taken.
    pub last_updated: DateTime<Utc>,
    /// Sources, most articles first.
    pub sources: Vec<SourceInfo>,
    /// Months with articles, calendar order.
    pub months: Vec<MonthInfo>,
    /// Years, latest first.
    pub years: Vec<YearInfo>,
    /// Year filter values.
    pub all_years: Vec<String>,
    /// Source filter values.
    pub all_sources: Vec<String>,
    /// Serialized chart data.
    pub charts: ChartPayloads,
    /// Oldest unread articles, oldest first.
    pub top_oldest_unread_articles: Vec<ArticleMeta>,
}

impl ViewModel {
    /// Project `metrics`. `reference` picks the month of the monthly badge.
    pub fn build(metrics: &Metrics, reference: DateTime<Utc>) -> Result<Self> {
        let sources = source_infos(metrics);
        let years = year_infos(metrics);
        let months = month_infos(metrics);
        let charts = ChartPayloads::build(metrics, &sources, &years, &months)?;

        let month = badges::badge_month(metrics, reference);
        let highlight_metrics = vec![
            metric(
                "🎯 Top Read Rate Source",
                badges::top_read_rate_source(metrics).unwrap_or_else(|| NO_BADGE.to_string()),
            ),
            metric(
                "📚 Most Unread Source",
                badges::most_unread_source(metrics).unwrap_or_else(|| NO_BADGE.to_string()),
            ),
            metric(
                "✅ This Month's Articles",
                badges::this_month_articles(metrics, &month).to_string(),
            ),
        ];

        debug!(
            sources = sources.len(),
            years = years.len(),
            months = months.len(),
            "Built view model"
        );

        Ok(Self {
            key_metrics: key_metrics(metrics),
            highlight_metrics,
            total_articles: metrics.total_articles,
            read_count: metrics.read_count,
            unread_count: metrics.unread_count,
            read_rate: metrics.read_rate,
            avg_articles_per_month: metrics.avg_articles_per_month,
            last_updated: metrics.last_updated,
            all_years: years.iter().map(|y| y.year.clone()).collect(),
            all_sources: sources.iter().map(|s| s.name.clone()).collect(),
            sources,
            months,
            years,
            charts,
            top_oldest_unread_articles: metrics.top_oldest_unread_articles.clone(),
        })
    }
}

fn metric(title: &str, value: String) -> KeyMetric {
    KeyMetric {
        title: title.to_string(),
        value,
    }
}

/// Headline numbers in display order.
pub fn key_metrics(metrics: &Metrics) -> Vec<KeyMetric> {
    vec![
        metric("Total Articles", metrics.total_articles.to_string()),
        metric("Read Rate", format!("{:.1}%", metrics.read_rate)),
        metric("Read", metrics.read_count.to_string()),
        metric("Unread", metrics.unread_count.to_string()),
        metric("Avg/Month", format!("{:.0}", metrics.avg_articles_per_month)),
    ]
}

/// One entry per source, most articles first, ties by name.
pub fn source_infos(metrics: &Metrics) -> Vec<SourceInfo> {
    let authors = metrics.author_count().filter(|&count| count > 0);

    let mut sources: Vec<SourceInfo> = metrics
        .by_source
        .iter()
        .map(|(name, &count)| {
            let status = metrics
                .by_source_read_status
                .get(name)
                .copied()
                .unwrap_or_default();
            SourceInfo {
                name: name.clone(),
                count,
                read: status.read,
                unread: status.unread,
                read_pct: percentage(status.read, count),
                author_count: authors.filter(|_| name == AUTHOR_TRACKED_SOURCE),
            }
        })
        .collect();

    sources.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    sources
}

/// One entry per year, latest first.
pub fn year_infos(metrics: &Metrics) -> Vec<YearInfo> {
    metrics
        .by_year
        .iter()
        .rev()
        .map(|(year, &count)| YearInfo {
            year: year.clone(),
            count,
        })
        .collect()
}

/// Calendar months with at least one article, all years combined.
pub fn month_infos(metrics: &Metrics) -> Vec<MonthInfo> {
    SHORT_MONTH_NAMES
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            let month = format!("{:02}", index + 1);
            let sources: BTreeMap<String, u64> = metrics
                .by_month_and_source
                .get(&month)?
                .iter()
                .map(|(source, status)| (source.clone(), status.total()))
                .collect();
            let total = sources.values().sum();
            (total > 0).then(|| MonthInfo {
                name: (*name).to_string(),
                month,
                year: String::new(),
                total,
                sources,
            })
        })
        .collect()
}
