//! Row sources: where the articles and providers sheets come from.

use crate::engine;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use shelf_common::{Metrics, Result, ShelfError, AUTHOR_TRACKED_SOURCE};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Articles tab names tried when none is configured.
pub const DEFAULT_ARTICLES_SHEETS: [&str; 2] = ["articles", "Articles"];
/// Providers tab names tried when none is configured.
pub const DEFAULT_PROVIDERS_SHEETS: [&str; 2] = ["providers", "Providers"];

/// Column of the provider name in the providers sheet.
const PROVIDER_NAME_COLUMN: usize = 0;

/// Supplier of raw sheet rows. Both sheets include their header row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RowSource: Send + Sync {
    /// All rows of the articles sheet.
    async fn article_rows(&self) -> Result<Vec<Vec<String>>>;

    /// All rows of the providers sheet.
    async fn provider_rows(&self) -> Result<Vec<Vec<String>>>;
}

/// A workbook export in the spreadsheet "values" layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Workbook {
    /// Tab name -> rows of cells.
    #[serde(default)]
    pub sheets: BTreeMap<String, Vec<Vec<Value>>>,
}

impl Workbook {
    /// Parse a workbook from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| ShelfError::row_source_with_source("Workbook is not valid JSON", e))
    }

    /// Rows of the first tab found, cells rendered as strings.
    pub fn sheet(&self, configured: Option<&str>, fallbacks: &[&str]) -> Result<Vec<Vec<String>>> {
        let candidates: Vec<&str> = configured.map_or_else(|| fallbacks.to_vec(), |name| vec![name]);

        candidates
            .iter()
            .find_map(|name| self.sheets.get(*name))
            .map(|rows| {
                rows.iter()
                    .map(|row| row.iter().map(cell_to_string).collect())
                    .collect()
            })
            .ok_or_else(|| {
                ShelfError::row_source(format!(
                    "Sheet {} not found in workbook",
                    candidates.join(" / ")
                ))
            })
    }
}

/// Render one cell the way a sheet displays it.
pub fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// A [`RowSource`] over a workbook JSON file on disk.
///
/// The file is read and parsed on first use and both sheets are served
/// from that one parse. A failed read is not cached.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
    articles_sheet: Option<String>,
    providers_sheet: Option<String>,
    workbook: OnceCell<Workbook>,
}

impl WorkbookSource {
    /// Source reading `path` with the default tab names.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            articles_sheet: None,
            providers_sheet: None,
            workbook: OnceCell::new(),
        }
    }

    /// Override the tab names.
    #[must_use]
    pub fn with_sheets(mut self, articles: Option<String>, providers: Option<String>) -> Self {
        self.articles_sheet = articles;
        self.providers_sheet = providers;
        self
    }

    /// Workbook file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<&Workbook> {
        self.workbook
            .get_or_try_init(|| async {
                let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                    ShelfError::row_source_with_source(
                        format!("Failed to read workbook {}", self.path.display()),
                        e,
                    )
                })?;
                debug!(path = %self.path.display(), bytes = text.len(), "Parsed workbook");
                Workbook::from_json(&text)
            })
            .await
    }
}

#[async_trait]
impl RowSource for WorkbookSource {
    async fn article_rows(&self) -> Result<Vec<Vec<String>>> {
        let rows = self
            .load()
            .await?
            .sheet(self.articles_sheet.as_deref(), &DEFAULT_ARTICLES_SHEETS)?;
        debug!(rows = rows.len(), path = %self.path.display(), "Read articles sheet");
        Ok(rows)
    }

    async fn provider_rows(&self) -> Result<Vec<Vec<String>>> {
        self.load()
            .await?
            .sheet(self.providers_sheet.as_deref(), &DEFAULT_PROVIDERS_SHEETS)
    }
}

/// Providers sheet rows (header skipped) naming the tracked source.
pub fn count_authors(rows: &[Vec<String>]) -> u64 {
    let count = rows
        .iter()
        .skip(1)
        .filter_map(|row| row.get(PROVIDER_NAME_COLUMN))
        .filter(|name| name.eq_ignore_ascii_case(AUTHOR_TRACKED_SOURCE))
        .count();
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// Fetch both sheets and aggregate them into one snapshot.
///
/// The providers sheet is optional: a failure there is logged and the
/// author count becomes zero. A failure or an empty result from the
/// articles sheet fails the whole collection.
#[instrument(skip(source))]
pub async fn collect_snapshot(source: &dyn RowSource, reference: DateTime<Utc>) -> Result<Metrics> {
    let author_count = match source.provider_rows().await {
        Ok(rows) => count_authors(&rows),
        Err(err) => {
            warn!(error = %err, "Unable to read providers sheet, author count defaults to 0");
            0
        }
    };

    let rows = source.article_rows().await?;
    if rows.is_empty() {
        return Err(ShelfError::EmptyInput);
    }
    info!(rows = rows.len(), author_count, "Fetched articles sheet");

    engine::aggregate(&rows, author_count, reference)
}
