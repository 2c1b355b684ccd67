//! Configuration schema definitions using serde with validation attributes.

use serde::{Deserialize, Serialize};
use shelf_common::LoggingConfig;
use std::path::PathBuf;
use validator::Validate;

/// Main configuration structure for Shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Where article rows come from.
    #[validate]
    pub source: SourceConfig,
    /// Input and output directories.
    #[validate]
    pub paths: PathsConfig,
    /// Report presentation settings.
    #[validate]
    pub report: ReportConfig,
    /// Logging settings.
    #[validate]
    pub logging: LogConfig,
}

/// Workbook row source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SourceConfig {
    /// Path of the exported workbook JSON file.
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Workbook path must be a non-empty valid path"
    ))]
    pub workbook_path: String,
    /// Articles tab name; `Articles` or `articles` when unset.
    #[validate(length(min = 1, message = "Articles sheet name cannot be empty if specified"))]
    pub articles_sheet: Option<String>,
    /// Providers tab name; `Providers` or `providers` when unset.
    #[validate(length(min = 1, message = "Providers sheet name cannot be empty if specified"))]
    pub providers_sheet: Option<String>,
}

/// Directory layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding one `YYYY-MM-DD.json` snapshot per run.
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Metrics directory must be a non-empty valid path"
    ))]
    pub metrics_dir: String,
    /// Root of the generated site.
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Site directory must be a non-empty valid path"
    ))]
    pub site_dir: String,
    /// Directory with optional page content such as `evolution.yml`.
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Content directory must be a non-empty valid path"
    ))]
    pub content_dir: String,
}

/// Report presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportConfig {
    /// Page title.
    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    pub title: String,
    /// IANA timezone that decides the calendar date of a run.
    #[validate(custom(
        function = "crate::validation::validate_timezone",
        message = "Timezone must be a valid IANA timezone name"
    ))]
    pub timezone: String,
    /// Accent colour used by the stylesheet.
    #[validate(length(equal = 7, message = "Accent color must be 7 characters (e.g., #667EEA)"))]
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Accent color must be valid hex color"
    ))]
    pub accent_color: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error).
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,
    /// Emit JSON lines instead of plain text.
    pub json: bool,
    /// Optional log file path.
    pub file: Option<String>,
}

impl Config {
    /// Validate the configuration and all nested sections.
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }

    /// Parsed report timezone.
    ///
    /// Falls back to UTC for a name that does not parse; [`Config::validate_all`]
    /// rejects such names before this is reached in normal use.
    pub fn timezone(&self) -> chrono_tz::Tz {
        self.report.timezone.parse().unwrap_or(chrono_tz::UTC)
    }

    /// Logging settings in the form expected by the tracing bootstrap.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.logging.level.clone(),
            json_format: self.logging.json,
            file_path: self.logging.file.as_ref().map(PathBuf::from),
            ..LoggingConfig::default()
        }
    }

    /// Snapshot directory as a path.
    pub fn metrics_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.metrics_dir)
    }

    /// Site output directory as a path.
    pub fn site_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.site_dir)
    }

    /// Content directory as a path.
    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.content_dir)
    }
}
