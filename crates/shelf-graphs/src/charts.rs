//! Chart.js payloads.
//!
//! Every payload keeps its label array and each data array the same length,
//! in the order of the sorted view structures they are built from.

use crate::colors::{source_color, DATASET_BORDER_COLOR};
use crate::view::{MonthInfo, SourceInfo, YearInfo, SHORT_MONTH_NAMES};
use serde::Serialize;
use shelf_common::{AgeBucket, Metrics, Result};

/// `{labels, data}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledSeries {
    /// X axis labels.
    pub labels: Vec<String>,
    /// One value per label.
    pub data: Vec<u64>,
}

/// `{labels, readData, unreadData}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadUnreadSeries {
    /// X axis labels.
    pub labels: Vec<String>,
    /// Read count per label.
    pub read_data: Vec<u64>,
    /// Unread count per label.
    pub unread_data: Vec<u64>,
}

/// One stacked bar series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    /// Source name.
    pub label: String,
    /// One value per month.
    pub data: Vec<u64>,
    /// Fill colour.
    pub background_color: String,
    /// Outline colour.
    pub border_color: String,
    /// Outline width in pixels.
    pub border_width: u32,
}

/// Month chart: one dataset per source plus the monthly totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthChart {
    /// Month names.
    pub labels: Vec<String>,
    /// Per-source series.
    pub datasets: Vec<ChartDataset>,
    /// Total per month.
    pub totals: Vec<u64>,
}

/// Articles per year, latest first.
pub fn year_chart(years: &[YearInfo]) -> LabeledSeries {
    LabeledSeries {
        labels: years.iter().map(|y| y.year.clone()).collect(),
        data: years.iter().map(|y| y.count).collect(),
    }
}

/// Stacked per-source article counts for the months that have articles.
pub fn month_chart(months: &[MonthInfo], sources: &[SourceInfo]) -> MonthChart {
    let datasets = sources
        .iter()
        .map(|source| ChartDataset {
            label: source.name.clone(),
            data: months
                .iter()
                .map(|month| month.sources.get(&source.name).copied().unwrap_or(0))
                .collect(),
            background_color: source_color(&source.name),
            border_color: DATASET_BORDER_COLOR.to_string(),
            border_width: 1,
        })
        .collect();

    MonthChart {
        labels: months.iter().map(|m| m.name.clone()).collect(),
        datasets,
        totals: months.iter().map(|m| m.total).collect(),
    }
}

/// Read and unread per calendar month, all twelve months.
pub fn read_unread_by_month(metrics: &Metrics) -> ReadUnreadSeries {
    let (read_data, unread_data): (Vec<u64>, Vec<u64>) = (1..=12)
        .map(|month| {
            let key = format!("{month:02}");
            let unread = metrics.unread_by_month.get(&key).copied().unwrap_or(0);
            let read = metrics
                .by_month
                .get(&key)
                .map_or(0, |total| total.saturating_sub(unread));
            (read, unread)
        })
        .unzip();

    ReadUnreadSeries {
        labels: SHORT_MONTH_NAMES.iter().map(|m| (*m).to_string()).collect(),
        read_data,
        unread_data,
    }
}

/// Read and unread per source, in source order.
pub fn read_unread_by_source(sources: &[SourceInfo]) -> ReadUnreadSeries {
    ReadUnreadSeries {
        labels: sources.iter().map(|s| s.name.clone()).collect(),
        read_data: sources.iter().map(|s| s.read).collect(),
        unread_data: sources.iter().map(|s| s.unread).collect(),
    }
}

/// Read and unread per year, latest first.
pub fn read_unread_by_year(metrics: &Metrics) -> ReadUnreadSeries {
    let mut labels = Vec::new();
    let mut read_data = Vec::new();
    let mut unread_data = Vec::new();

    for (year, &total) in metrics.by_year.iter().rev() {
        let unread = metrics.unread_by_year.get(year).copied().unwrap_or(0);
        labels.push(year.clone());
        read_data.push(total.saturating_sub(unread));
        unread_data.push(unread);
    }

    ReadUnreadSeries {
        labels,
        read_data,
        unread_data,
    }
}

/// Unread articles per age bucket, youngest first.
pub fn unread_age_distribution(metrics: &Metrics) -> LabeledSeries {
    LabeledSeries {
        labels: AgeBucket::ALL
            .iter()
            .map(|bucket| bucket.label().to_string())
            .collect(),
        data: AgeBucket::ALL
            .iter()
            .map(|bucket| {
                metrics
                    .unread_article_age_distribution
                    .get(bucket.key())
                    .copied()
                    .unwrap_or(0)
            })
            .collect(),
    }
}

/// Unread articles per year, latest first.
pub fn unread_by_year(metrics: &Metrics) -> LabeledSeries {
    LabeledSeries {
        labels: metrics.unread_by_year.keys().rev().cloned().collect(),
        data: metrics.unread_by_year.values().rev().copied().collect(),
    }
}

/// All chart payloads of a page, serialized to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPayloads {
    /// [`year_chart`]
    pub years: String,
    /// [`month_chart`]
    pub months: String,
    /// [`read_unread_by_month`]
    pub read_unread_by_month: String,
    /// [`read_unread_by_source`]
    pub read_unread_by_source: String,
    /// [`read_unread_by_year`]
    pub read_unread_by_year: String,
    /// [`unread_age_distribution`]
    pub unread_age_distribution: String,
    /// [`unread_by_year`]
    pub unread_by_year: String,
    /// Year filter values.
    pub all_years: String,
    /// Source filter values.
    pub all_sources: String,
}

impl ChartPayloads {
    /// Serialize every chart of a snapshot.
    pub fn build(
        metrics: &Metrics,
        sources: &[SourceInfo],
        years: &[YearInfo],
        months: &[MonthInfo],
    ) -> Result<Self> {
        let all_years: Vec<&str> = years.iter().map(|y| y.year.as_str()).collect();
        let all_sources: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();

        Ok(Self {
            years: serde_json::to_string(&year_chart(years))?,
            months: serde_json::to_string(&month_chart(months, sources))?,
            read_unread_by_month: serde_json::to_string(&read_unread_by_month(metrics))?,
            read_unread_by_source: serde_json::to_string(&read_unread_by_source(sources))?,
            read_unread_by_year: serde_json::to_string(&read_unread_by_year(metrics))?,
            unread_age_distribution: serde_json::to_string(&unread_age_distribution(metrics))?,
            unread_by_year: serde_json::to_string(&unread_by_year(metrics))?,
            all_years: serde_json::to_string(&all_years)?,
            all_sources: serde_json::to_string(&all_sources)?,
        })
    }
}
