//! Rendering boundary between the regenerator and page output.

use shelf_common::{Result, SnapshotKey};
use shelf_graphs::ViewModel;
use std::path::{Path, PathBuf};

/// Subdirectory of the site that holds per-date reports.
pub const HISTORY_DIR: &str = "history";

/// Base URL of the top-level site.
pub const ROOT_BASE_URL: &str = "./";

/// Base URL of a page under `history/<key>/`.
pub const HISTORY_BASE_URL: &str = "../../";

/// Where and how one report is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Directory the pages are written to.
    pub output_dir: PathBuf,
    /// Relative prefix that leads from the output directory back to the site root.
    pub base_url: String,
    /// Whether this is an archived per-date report.
    pub is_historical: bool,
    /// Every snapshot key, most recent first.
    pub history_keys: Vec<SnapshotKey>,
    /// Key of the snapshot being rendered.
    pub report_key: SnapshotKey,
}

impl RenderConfig {
    /// Top-level site for the most recent snapshot.
    pub fn full(site_dir: &Path, report_key: SnapshotKey, history_keys: Vec<SnapshotKey>) -> Self {
        Self {
            output_dir: site_dir.to_path_buf(),
            base_url: ROOT_BASE_URL.to_string(),
            is_historical: false,
            history_keys,
            report_key,
        }
    }

    /// Archived report under `<site>/history/<key>/`.
    pub fn historical(
        site_dir: &Path,
        report_key: SnapshotKey,
        history_keys: Vec<SnapshotKey>,
    ) -> Self {
        Self {
            output_dir: history_dir(site_dir, report_key),
            base_url: HISTORY_BASE_URL.to_string(),
            is_historical: true,
            history_keys,
            report_key,
        }
    }
}

/// Output directory of the archived report for `key`.
pub fn history_dir(site_dir: &Path, key: SnapshotKey) -> PathBuf {
    site_dir.join(HISTORY_DIR).join(key.to_string())
}

/// Turns a [`ViewModel`] into pages on disk.
#[cfg_attr(test, mockall::automock)]
pub trait SiteRenderer: Send + Sync {
    /// Write only the analytics page.
    fn render_analytics(&self, view: &ViewModel, config: &RenderConfig) -> Result<()>;

    /// Write every page of the site plus its stylesheet.
    fn render_full(&self, view: &ViewModel, config: &RenderConfig) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_common::test_utils::mock_date;

    #[test]
    fn test_full_config() {
        let key = SnapshotKey(mock_date(2025, 1, 15));
        let config = RenderConfig::full(Path::new("site"), key, vec![key]);

        assert_eq!(config.output_dir, PathBuf::from("site"));
        assert_eq!(config.base_url, "./");
        assert!(!config.is_historical);
    }

    #[test]
    fn test_historical_config() {
        let key = SnapshotKey(mock_date(2025, 1, 8));
        let config = RenderConfig::historical(Path::new("site"), key, vec![key]);

        assert_eq!(config.output_dir, PathBuf::from("site/history/2025-01-08"));
        assert_eq!(config.base_url, "../../");
        assert!(config.is_historical);
        assert_eq!(config.report_key, key);
    }
}
