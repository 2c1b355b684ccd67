//! Default values for every configuration section.

use crate::schema::{Config, LogConfig, PathsConfig, ReportConfig, SourceConfig};

/// Default report title.
pub const DEFAULT_TITLE: &str = "📚 Personal Reading Analytics";

/// Default accent colour.
pub const DEFAULT_ACCENT_COLOR: &str = "#667eea";

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            paths: PathsConfig::default(),
            report: ReportConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            workbook_path: "workbook.json".to_string(),
            articles_sheet: None,
            providers_sheet: None,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            metrics_dir: "metrics".to_string(),
            site_dir: "site".to_string(),
            content_dir: "content".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            timezone: "UTC".to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
