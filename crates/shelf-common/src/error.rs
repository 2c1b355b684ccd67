//! Error types and utilities for Shelf

use thiserror::Error;

/// Result type alias for Shelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for Shelf operations
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The row source could not deliver rows
    #[error("Row source error: {message}")]
    Source {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// Snapshot store read/write failures
    #[error("Snapshot store error: {message}")]
    Store {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// Page rendering failures
    #[error("Render error: {message}")]
    Render {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// The primary row source returned no rows at all
    #[error("No article rows found in the row source")]
    EmptyInput,

    /// The snapshot store holds no snapshots
    #[error("No snapshots found in the snapshot store")]
    NoSnapshotsFound,

    /// A specific snapshot does not exist
    #[error("Snapshot {key} not found")]
    SnapshotNotFound {
        /// The requested snapshot key
        key: String,
    },
}

impl ShelfError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new row source error
    pub fn row_source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new row source error with source
    pub fn row_source_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Source {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new snapshot store error with source
    pub fn store_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-snapshot error
    pub fn snapshot_not_found(key: impl ToString) -> Self {
        Self::SnapshotNotFound {
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = ShelfError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let source_error = ShelfError::row_source("sheet missing");
        assert_eq!(source_error.to_string(), "Row source error: sheet missing");
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = ShelfError::row_source_with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let render_error = ShelfError::render_with_source(
            "Failed to write page",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(render_error.to_string().contains("Render error"));
        assert!(render_error.source().is_some());
    }

    #[test]
    fn test_run_level_errors_display() {
        assert_eq!(
            ShelfError::EmptyInput.to_string(),
            "No article rows found in the row source"
        );
        assert_eq!(
            ShelfError::NoSnapshotsFound.to_string(),
            "No snapshots found in the snapshot store"
        );
        assert_eq!(
            ShelfError::snapshot_not_found("2025-01-15").to_string(),
            "Snapshot 2025-01-15 not found"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let shelf_error: ShelfError = io_error.into();

        assert!(shelf_error.to_string().contains("I/O error"));
        assert!(shelf_error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let shelf_error: ShelfError = serde_error.into();

        assert!(shelf_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = ShelfError::store_with_source("Middle layer", root_error);
        let top_error = ShelfError::render_with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
    }
}
