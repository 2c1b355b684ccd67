//! Main entry point for Shelf.

use anyhow::{Context, Result};
use clap::Parser;
use shelf::{run_analytics, run_metrics, Cli, Command};
use shelf_common::init_logging;
use shelf_config::ConfigLoader;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _guard = init_logging(&config.logging_config()).context("Failed to initialize logging")?;

    let reference = cli.command.args().reference();
    info!(%reference, "Starting Shelf");

    match cli.command {
        Command::Metrics(_) => {
            let key = run_metrics(&config, reference)
                .await
                .context("Failed to collect metrics")?;
            info!(%key, "✅ Metrics snapshot written");
        }
        Command::Analytics(_) => {
            let report = run_analytics(&config, reference).context("Failed to generate analytics")?;
            let skipped = report.failed().count();
            if skipped > 0 {
                warn!(skipped, "Some historical reports were skipped");
            }
            info!(
                passes = report.outcomes.len(),
                "✅ Successfully generated all historical and latest analytics"
            );
        }
    }

    Ok(())
}
