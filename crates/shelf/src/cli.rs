//! Command line interface.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Reading-list analytics: dated snapshots and a static report site.
#[derive(Parser, Debug)]
#[command(name = "shelf", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (falls back to SHELF_CONFIG, then shelf.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// What to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Aggregate the workbook into today's snapshot
    Metrics(RunArgs),
    /// Regenerate the report site from every stored snapshot
    Analytics(RunArgs),
}

impl Command {
    /// Options shared by every subcommand.
    pub const fn args(&self) -> &RunArgs {
        match self {
            Self::Metrics(args) | Self::Analytics(args) => args,
        }
    }
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Reference instant, RFC 3339 or YYYY-MM-DD (default: now)
    #[arg(long, value_parser = parse_as_of)]
    pub as_of: Option<DateTime<Utc>>,
}

impl RunArgs {
    /// The injected reference instant, or the current time.
    pub fn reference(&self) -> DateTime<Utc> {
        self.as_of.unwrap_or_else(Utc::now)
    }
}

/// Parse an RFC 3339 timestamp or a bare date, taken as midnight UTC.
pub fn parse_as_of(value: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| AppError::InvalidAsOf {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shelf_common::test_utils::mock_timestamp;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_as_of() {
        assert_eq!(
            parse_as_of("2025-01-15").unwrap(),
            mock_timestamp(2025, 1, 15, 0, 0, 0)
        );
        assert_eq!(
            parse_as_of("2025-01-15T10:30:00+02:00").unwrap(),
            mock_timestamp(2025, 1, 15, 8, 30, 0)
        );
        assert!(matches!(
            parse_as_of("15/01/2025"),
            Err(AppError::InvalidAsOf { .. })
        ));
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["shelf", "metrics", "--as-of", "2025-01-15"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Metrics(RunArgs {
                as_of: Some(mock_timestamp(2025, 1, 15, 0, 0, 0)),
            })
        );
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["shelf", "analytics", "--config", "custom.yaml"]).unwrap();
        assert_eq!(cli.command, Command::Analytics(RunArgs::default()));
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_rejects_unknown_input() {
        assert!(Cli::try_parse_from(["shelf"]).is_err());
        assert!(Cli::try_parse_from(["shelf", "publish"]).is_err());
        assert!(Cli::try_parse_from(["shelf", "metrics", "--as-of", "yesterday"]).is_err());
    }
}
