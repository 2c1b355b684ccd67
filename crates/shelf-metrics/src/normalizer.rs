//! Row normalization: one raw sheet row into a typed article.

use chrono::NaiveDate;
use shelf_common::ArticleMeta;
use thiserror::Error;

/// Column positions in the articles sheet.
pub mod columns {
    /// `YYYY-MM-DD` publication date.
    pub const DATE: usize = 0;
    /// Article title.
    pub const TITLE: usize = 1;
    /// Article URL.
    pub const LINK: usize = 2;
    /// Source name.
    pub const SOURCE: usize = 3;
    /// Read flag.
    pub const READ: usize = 4;
}

/// Fewest cells a row may have.
pub const MIN_FIELDS: usize = columns::READ + 1;

/// Source recorded for rows with a blank source cell.
pub const UNKNOWN_SOURCE: &str = "Unknown";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lower-cased source name -> canonical spelling.
const CANONICAL_SOURCES: [(&str, &str); 5] = [
    ("substack", "Substack"),
    ("freecodecamp", "freeCodeCamp"),
    ("github", "GitHub"),
    ("shopify", "Shopify"),
    ("stripe", "Stripe"),
];

/// When each known source was added to the tracker.
pub const SOURCE_ADDED: [(&str, &str); 5] = [
    ("freeCodeCamp", "initial"),
    ("Substack", "initial"),
    ("GitHub", "2024-03-18"),
    ("Shopify", "2025-03-05"),
    ("Stripe", "2025-11-19"),
];

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row has fewer cells than required.
    #[error("incomplete row: expected at least {expected} columns, got {found}")]
    IncompleteRow {
        /// Required cell count
        expected: usize,
        /// Actual cell count
        found: usize,
    },

    /// The date cell is not a `YYYY-MM-DD` date.
    #[error("invalid date format: {value:?}")]
    InvalidDate {
        /// The rejected cell
        value: String,
    },
}

/// The fields of a row that feed the aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArticle {
    /// Publication date.
    pub date: NaiveDate,
    /// Canonical source name.
    pub category: String,
    /// Read flag.
    pub is_read: bool,
}

/// Canonical spelling of a source name.
///
/// Known names match case-insensitively; unknown names are returned as given.
pub fn canonical_source(raw: &str) -> String {
    if raw.trim().is_empty() {
        return UNKNOWN_SOURCE.to_string();
    }

    let lower = raw.to_lowercase();
    CANONICAL_SOURCES
        .iter()
        .find(|(key, _)| *key == lower)
        .map_or_else(|| raw.to_string(), |(_, canonical)| (*canonical).to_string())
}

/// Only the exact literals `TRUE` and `true` mean read.
pub fn is_read_flag(raw: &str) -> bool {
    matches!(raw, "TRUE" | "true")
}

fn parse_date(raw: &str) -> Result<NaiveDate, RowError> {
    // chrono accepts unpadded fields, the sheet format does not
    if raw.len() != 10 {
        return Err(RowError::InvalidDate {
            value: raw.to_string(),
        });
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| RowError::InvalidDate {
        value: raw.to_string(),
    })
}

fn check_len<S>(row: &[S]) -> Result<(), RowError> {
    if row.len() < MIN_FIELDS {
        return Err(RowError::IncompleteRow {
            expected: MIN_FIELDS,
            found: row.len(),
        });
    }
    Ok(())
}

/// Parse one data row.
pub fn normalize_row<S: AsRef<str>>(row: &[S]) -> Result<ParsedArticle, RowError> {
    check_len(row)?;

    Ok(ParsedArticle {
        date: parse_date(row[columns::DATE].as_ref())?,
        category: canonical_source(row[columns::SOURCE].as_ref()),
        is_read: is_read_flag(row[columns::READ].as_ref()),
    })
}

/// Full per-article record of a row, used for the unread selections.
pub fn article_meta<S: AsRef<str>>(row: &[S]) -> Result<ArticleMeta, RowError> {
    let parsed = normalize_row(row)?;

    Ok(ArticleMeta {
        title: row[columns::TITLE].as_ref().to_string(),
        date: row[columns::DATE].as_ref().to_string(),
        link: row[columns::LINK].as_ref().to_string(),
        category: parsed.category,
        read: parsed.is_read,
    })
}
