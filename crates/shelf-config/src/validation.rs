//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Log levels accepted in configuration.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate an IANA timezone name such as `UTC` or `Europe/Copenhagen`
pub fn validate_timezone(timezone: &str) -> Result<(), ValidationError> {
    if timezone.is_empty() {
        return Err(ValidationError::new("empty_timezone"));
    }

    timezone
        .parse::<chrono_tz::Tz>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_timezone"))
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters (C:\)
    let invalid_chars = ['<', '>', '"', '|', '?', '*', '\0'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

/// Validate a log level name, case-insensitively
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#667eea"));

        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFFFFFF"));
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(validate_timezone("Asia/Kolkata").is_ok());

        assert!(validate_timezone("").is_err());
        assert!(validate_timezone("Nowhere/Special").is_err());
        assert!(validate_timezone("EST5EDT-ish").is_err());
    }

    #[test]
    fn test_validate_file_path() {
        assert!(validate_file_path("metrics").is_ok());
        assert!(validate_file_path("/var/lib/shelf/site").is_ok());
        assert!(validate_file_path("C:\\shelf\\metrics").is_ok());

        assert!(validate_file_path("").is_err());
        assert!(validate_file_path("   ").is_err());
        assert!(validate_file_path("site<1>").is_err());
        assert!(validate_file_path("what?").is_err());
    }

    #[test]
    fn test_validate_log_level() {
        for level in LOG_LEVELS {
            assert!(validate_log_level(level).is_ok());
        }
        assert!(validate_log_level("INFO").is_ok());
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("").is_err());
    }
}
