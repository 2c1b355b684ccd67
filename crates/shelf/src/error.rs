//! Application-wide error types using thiserror.

use shelf_common::ShelfError;
use shelf_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failure in collection, storage or rendering.
    #[error(transparent)]
    Shelf(#[from] ShelfError),

    /// `--as-of` value that is neither RFC 3339 nor `YYYY-MM-DD`.
    #[error("Invalid --as-of value '{value}': expected RFC 3339 or YYYY-MM-DD")]
    InvalidAsOf {
        /// The rejected value.
        value: String,
    },
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
