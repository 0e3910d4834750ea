//! RentDesk development API server
//!
//! Run with: cargo run --bin rentdesk-api
//!
//! # Configuration
//!
//! Read from the `[server]` and `[logging]` sections of the config file
//! (see `rentdesk config`), then environment variables:
//! - `RENTDESK_SERVER_HOST`: Host to bind to (default: 127.0.0.1)
//! - `RENTDESK_SERVER_PORT`: Port to listen on (default: 5000)
//! - `RENTDESK_ADMIN_EMAIL` / `RENTDESK_ADMIN_PASSWORD`: Seeded administrator
//! - `RENTDESK_SEED_SAMPLE_DATA`: Start with sample records (default: false)
//! - `RUST_LOG`: Log filter (default: rentdesk=info,tower_http=debug)

use rentdesk::config::Config;
use rentdesk::server::{serve, AppState};
use rentdesk::telemetry::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    init_logging(&config.logging, &["tower_http=debug"])?;

    tracing::info!("Starting RentDesk API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Administrator account: {}", config.server.admin_email);
    if config.server.seed_sample_data {
        tracing::info!("Seeding sample records");
    }

    let state = AppState::new(config.server.clone());
    serve(state, &config.server).await?;

    tracing::info!("RentDesk API server stopped");
    Ok(())
}
