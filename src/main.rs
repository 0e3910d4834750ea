//! RentDesk CLI
//!
//! Command-line front end for the RentDesk rental dashboard.

use clap::Parser;
use rentdesk::cli::{run, Cli};
use rentdesk::config::LoggingConfig;
use rentdesk::telemetry::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Quiet by default: stdout belongs to command output
    let logging = LoggingConfig {
        level: "warn".to_string(),
        ..Default::default()
    };
    init_logging(&logging, &[])?;

    run(cli).await
}
