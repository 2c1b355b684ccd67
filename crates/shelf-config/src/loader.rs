//! Configuration loading utilities

use crate::Config;
use shelf_common::{Result as ShelfResult, ShelfError};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SHELF_CONFIG";

/// File names tried in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["shelf.yaml", "shelf.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the offending variable
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for ShelfError {
    fn from(err: ConfigError) -> Self {
        ShelfError::config_with_source("Could not load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "Parsed configuration file");

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the usual places.
    ///
    /// An explicit `path` wins, then `SHELF_CONFIG`, then `shelf.yaml` /
    /// `shelf.yml` in the working directory, then built-in defaults.
    /// Environment overrides apply in every case.
    pub fn load(path: Option<&Path>) -> ShelfResult<Config> {
        if let Some(path) = path {
            info!(path = %path.display(), "Loading configuration");
            return Ok(Self::load_config(path)?);
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            info!(path = %config_path, "Loading configuration from {CONFIG_PATH_ENV}");
            return Ok(Self::load_config(&config_path)?);
        }

        if let Some(found) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|candidate| candidate.exists())
        {
            info!(path = %found.display(), "Loading configuration");
            return Ok(Self::load_config(found)?);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::defaults_with_env()?)
    }

    /// Built-in defaults plus environment overrides, validated.
    pub fn defaults_with_env() -> Result<Config, ConfigError> {
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Apply `SHELF_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |name| env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SHELF_WORKBOOK") {
            config.source.workbook_path = path;
        }
        if let Some(sheet) = lookup("SHELF_ARTICLES_SHEET") {
            config.source.articles_sheet = Some(sheet);
        }
        if let Some(sheet) = lookup("SHELF_PROVIDERS_SHEET") {
            config.source.providers_sheet = Some(sheet);
        }

        if let Some(dir) = lookup("SHELF_METRICS_DIR") {
            config.paths.metrics_dir = dir;
        }
        if let Some(dir) = lookup("SHELF_SITE_DIR") {
            config.paths.site_dir = dir;
        }
        if let Some(dir) = lookup("SHELF_CONTENT_DIR") {
            config.paths.content_dir = dir;
        }

        if let Some(title) = lookup("SHELF_TITLE") {
            config.report.title = title;
        }
        if let Some(timezone) = lookup("SHELF_TIMEZONE") {
            config.report.timezone = timezone;
        }

        if let Some(level) = lookup("SHELF_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = lookup("SHELF_LOG_JSON") {
            config.logging.json = json.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "SHELF_LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }
        if let Some(file) = lookup("SHELF_LOG_FILE") {
            config.logging.file = Some(file).filter(|file| !file.is_empty());
        }

        Ok(())
    }
}
