//! Structured logging infrastructure for Shelf

use crate::error::{Result, ShelfError};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "shelf_metrics=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Optional file path for log output
    pub file_path: Option<PathBuf>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. When logging to a file
/// the returned guard must be kept alive until shutdown so buffered lines
/// are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ShelfError::config_with_source("Invalid log level filter", e))?;

    let (writer, guard) = match &config.file_path {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (writer, Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };
    let ansi = config.file_path.is_none();

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if config.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(ansi)
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init()
    };
    installed.map_err(|e| ShelfError::config_with_source("Failed to install tracing subscriber", e))?;

    Ok(guard)
}

fn file_writer(path: &Path) -> Result<(BoxMakeWriter, WorkerGuard)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ShelfError::config(format!("Log file path {} has no file name", path.display())))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    Ok((BoxMakeWriter::new(non_blocking), guard))
}
