//! Snapshot data model shared by every crate in the workspace.
//!
//! The serialized field names of [`Metrics`] are the on-disk snapshot format,
//! so renaming a field here is a format change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Bookkeeping key in `by_source_read_status` that carries the provider
/// (author) count as `[count, 0]`. It is never a real source.
pub const AUTHOR_COUNT_KEY: &str = "substack_author_count";

/// The only source whose provider count is tracked.
pub const AUTHOR_TRACKED_SOURCE: &str = "Substack";

/// Number of oldest unread articles kept in a snapshot.
pub const TOP_UNREAD_ARTICLES_COUNT: usize = 3;

/// A `(read, unread)` pair, serialized as a two element array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u64; 2]", into = "[u64; 2]")]
pub struct ReadStatus {
    /// Articles marked as read.
    pub read: u64,
    /// Articles not yet read.
    pub unread: u64,
}

impl ReadStatus {
    /// Creates a pair from explicit counts.
    pub const fn new(read: u64, unread: u64) -> Self {
        Self { read, unread }
    }

    /// Sum of both halves.
    pub const fn total(self) -> u64 {
        self.read + self.unread
    }

    /// Counts one article into the matching half.
    pub fn record(&mut self, is_read: bool) {
        if is_read {
            self.read += 1;
        } else {
            self.unread += 1;
        }
    }
}

impl From<[u64; 2]> for ReadStatus {
    fn from([read, unread]: [u64; 2]) -> Self {
        Self { read, unread }
    }
}

impl From<ReadStatus> for [u64; 2] {
    fn from(status: ReadStatus) -> Self {
        [status.read, status.unread]
    }
}

/// Minimal per-article record kept for backlog analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleMeta {
    /// Article title.
    pub title: String,
    /// Publication date as `YYYY-MM-DD`.
    pub date: String,
    /// Article URL.
    pub link: String,
    /// Canonical source name.
    pub category: String,
    /// Whether the article has been read.
    pub read: bool,
}

/// When a source was added to the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMeta {
    /// `YYYY-MM-DD`, or `initial` for sources tracked from the start.
    pub added: String,
}

/// One dated aggregate of the reading list.
///
/// All maps are ordered so that a snapshot serializes to the same bytes
/// every time. Every field defaults when missing, which keeps older
/// snapshot files readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Articles counted in this snapshot.
    pub total_articles: u64,
    /// source -> count
    pub by_source: BTreeMap<String, u64>,
    /// source -> (read, unread), plus the [`AUTHOR_COUNT_KEY`] entry
    pub by_source_read_status: BTreeMap<String, ReadStatus>,
    /// `YYYY` -> count
    pub by_year: BTreeMap<String, u64>,
    /// `MM` -> count, all years combined
    pub by_month: BTreeMap<String, u64>,
    /// year -> month -> count
    pub by_year_and_month: BTreeMap<String, BTreeMap<String, u64>>,
    /// month -> source -> (read, unread)
    #[serde(rename = "by_month_and_source_read_status")]
    pub by_month_and_source: BTreeMap<String, BTreeMap<String, ReadStatus>>,
    /// category -> (read, unread)
    pub by_category: BTreeMap<String, ReadStatus>,
    /// category -> source -> (read, unread)
    pub by_category_and_source: BTreeMap<String, BTreeMap<String, ReadStatus>>,
    /// Global (read, unread).
    pub read_unread_totals: ReadStatus,
    /// `MM` -> unread count
    pub unread_by_month: BTreeMap<String, u64>,
    /// category -> unread count
    pub unread_by_category: BTreeMap<String, u64>,
    /// source -> unread count
    pub unread_by_source: BTreeMap<String, u64>,
    /// `YYYY` -> unread count
    pub unread_by_year: BTreeMap<String, u64>,
    /// [`AgeBucket::key`] -> unread count
    pub unread_article_age_distribution: BTreeMap<String, u64>,
    /// First element of `top_oldest_unread_articles`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_unread_article: Option<ArticleMeta>,
    /// Oldest unread articles, ascending by date.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top_oldest_unread_articles: Vec<ArticleMeta>,
    /// source -> when it was added
    pub source_metadata: BTreeMap<String, SourceMeta>,
    /// Articles marked as read.
    pub read_count: u64,
    /// Articles not yet read.
    pub unread_count: u64,
    /// `read_count / total_articles * 100`, or 0.
    pub read_rate: f64,
    /// Articles per month over the observed date span.
    pub avg_articles_per_month: f64,
    /// Reference instant of the run that produced this snapshot.
    pub last_updated: DateTime<Utc>,
    /// Optional free-text summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    /// Optional full article listing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub articles: Vec<ArticleMeta>,
}

impl Metrics {
    /// Provider count stored under [`AUTHOR_COUNT_KEY`], if present.
    pub fn author_count(&self) -> Option<u64> {
        self.by_source_read_status
            .get(AUTHOR_COUNT_KEY)
            .map(|status| status.read)
    }

    /// Per-source read status without the bookkeeping entry.
    pub fn source_read_status(&self) -> impl Iterator<Item = (&str, ReadStatus)> {
        self.by_source_read_status
            .iter()
            .filter(|(name, _)| name.as_str() != AUTHOR_COUNT_KEY)
            .map(|(name, status)| (name.as_str(), *status))
    }
}

/// Age classification of an unread article, oldest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBucket {
    /// Under one average month old.
    LessThanOneMonth,
    /// One to three months.
    OneToThreeMonths,
    /// Three to six months.
    ThreeToSixMonths,
    /// Six to twelve months.
    SixToTwelveMonths,
    /// One average year or older.
    OlderThanOneYear,
}

impl AgeBucket {
    /// All buckets in display order.
    pub const ALL: [Self; 5] = [
        Self::LessThanOneMonth,
        Self::OneToThreeMonths,
        Self::ThreeToSixMonths,
        Self::SixToTwelveMonths,
        Self::OlderThanOneYear,
    ];

    /// Key used in `unread_article_age_distribution`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::LessThanOneMonth => "less_than_1_month",
            Self::OneToThreeMonths => "1_to_3_months",
            Self::ThreeToSixMonths => "3_to_6_months",
            Self::SixToTwelveMonths => "6_to_12_months",
            Self::OlderThanOneYear => "older_than_1year",
        }
    }

    /// Chart label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::LessThanOneMonth => "Less than 1 month",
            Self::OneToThreeMonths => "1-3 months",
            Self::ThreeToSixMonths => "3-6 months",
            Self::SixToTwelveMonths => "6-12 months",
            Self::OlderThanOneYear => "Older than 1 year",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Identity of one snapshot: a calendar date.
///
/// Ordering is chronological, which equals the lexicographic order of the
/// `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotKey(pub NaiveDate);

impl SnapshotKey {
    /// Format used for file names and URLs.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// The calendar date of this key.
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// A string that is not a zero-padded `YYYY-MM-DD` calendar date.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid snapshot key '{0}': expected YYYY-MM-DD")]
pub struct InvalidSnapshotKey(pub String);

impl FromStr for SnapshotKey {
    type Err = InvalidSnapshotKey;

    /// Only the fixed-width form is accepted; chrono alone would also take
    /// unpadded fields such as `2025-1-9`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 10 {
            return Err(InvalidSnapshotKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| InvalidSnapshotKey(s.to_string()))
    }
}

impl From<NaiveDate> for SnapshotKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
