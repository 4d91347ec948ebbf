//! Booking Gateway
//!
//! Single entry point in front of the users, products and orders services.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌─────────────────────────────────────────────┐
//!                        │                   GATEWAY                   │
//!     Client Request     │  ┌─────────┐    ┌─────────┐    ┌─────────┐  │
//!     ───────────────────┼─▶│  http   │───▶│ routing │───▶│ request │  │
//!                        │  │ server  │    │  table  │    │ rewrite │  │
//!                        │  └─────────┘    └─────────┘    └────┬────┘  │
//!                        │                                     ▼       │
//!     Client Response    │  ┌─────────┐    ┌─────────┐    ┌─────────┐  │
//!     ◀──────────────────┼──│response │◀───│upstream │◀───│deadline │◀─┼──── users / products
//!                        │  │translate│    │ client  │    │         │  │     / orders service
//!                        │  └─────────┘    └─────────┘    └─────────┘  │
//!                        └─────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use booking_gateway::config::{self, CliOverrides};
use booking_gateway::lifecycle::startup;
use booking_gateway::observability;

#[derive(Parser)]
#[command(name = "booking-gateway")]
#[command(about = "Reverse-proxy gateway for the booking services", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults plus environment are used when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = config::load_dotenv()?;

    let cli = Cli::parse();
    let overrides = CliOverrides {
        bind_address: cli.bind,
    };
    let config = config::load_config(cli.config.as_deref(), &overrides)?;

    observability::init_logging(&config.observability)?;

    tracing::info!("booking-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        cors = config.cors.enabled,
        dotenv = dotenv_loaded,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
