//! Integration tests for shelf-config crate.

use shelf_config::{Config, ConfigError, ConfigLoader};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate_all().is_ok());

    config.paths.metrics_dir = String::new();
    assert!(config.validate_all().is_err());
}

#[test]
fn test_full_file_round_trip() {
    let mut config = Config::default();
    config.report.title = "Weekend Reading".to_string();
    config.report.timezone = "America/Chicago".to_string();
    config.source.articles_sheet = Some("Articles".to_string());

    let yaml = serde_yaml::to_string(&config).expect("serialize config");
    let file = write_config(&yaml);

    let loaded = ConfigLoader::load_config(file.path()).expect("load config");
    assert_eq!(loaded.report.title, "Weekend Reading");
    assert_eq!(loaded.timezone(), chrono_tz::America::Chicago);
    assert_eq!(loaded.source.articles_sheet.as_deref(), Some("Articles"));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let file = write_config("logging:\n  level: \"loud\"\n");
    let result = ConfigLoader::load_config(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_paths_helpers() {
    let config = Config::default();
    assert_eq!(config.metrics_dir(), std::path::PathBuf::from("metrics"));
    assert_eq!(config.site_dir(), std::path::PathBuf::from("site"));
    assert_eq!(config.content_dir(), std::path::PathBuf::from("content"));
}
