//! hazardscope risk lookup service.
//!
//! Loads `.env` and configuration, initializes tracing, and serves
//! `/api/risk` until Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use hs_api::server::{run_server, AppState};
use hs_core::config::AppConfig;
use hs_providers::LightBoxClient;

/// hazardscope risk lookup service
#[derive(Parser, Debug)]
#[command(name = "hs-api", about = "Serve flattened National Risk Index lookups")]
struct Args {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables take precedence.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = AppConfig::load(args.config)?;

    hs_core::logging::init_tracing(&config.logging);
    config.require_lightbox_key()?;

    tracing::info!(
        bind = %config.server.bind_addr(),
        lightbox = %config.lightbox.base_url,
        "starting hs-api"
    );

    let client = LightBoxClient::new(&config.lightbox)?;
    let state = Arc::new(AppState::new(Arc::new(client)));

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("ctrl-c received, shutting down");
                shutdown.cancel();
            }
            Err(err) => tracing::warn!(error = %err, "failed to listen for ctrl-c"),
        }
    });

    run_server(state, &config.server.bind_addr(), cancel).await
}
