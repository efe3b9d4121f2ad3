//! hs-export — save raw provider responses to JSON files.
//!
//! Usage:
//!   hs-export disasters --state TX --county Harris --output harris.json
//!   hs-export risk --lat 29.76 --lon -95.37 --flatten
//!
//! A provider error status is logged and nothing is written; the tool still
//! exits successfully.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use hs_api::export::{export_disasters, export_risk, ExportOutcome};
use hs_core::config::AppConfig;
use hs_core::types::GeoPoint;
use hs_providers::{DisasterQuery, FemaClient, LightBoxClient};

#[derive(Parser, Debug)]
#[command(name = "hs-export", about = "Save provider responses to JSON files")]
struct Args {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// FEMA disaster declaration summaries for a county.
    Disasters {
        /// Two-letter state code (e.g., TX).
        #[arg(long)]
        state: String,

        /// County name (e.g., Harris).
        #[arg(long)]
        county: String,

        /// Output file.
        #[arg(short, long, default_value = "disaster_declarations.json")]
        output: PathBuf,
    },
    /// LightBox risk indexes for a point.
    Risk {
        /// Latitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Output file.
        #[arg(short, long, default_value = "risk_data.json")]
        output: PathBuf,

        /// Write the flattened record instead of the raw response.
        #[arg(long, default_value_t = false)]
        flatten: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = AppConfig::load(args.config)?;
    hs_core::logging::init_tracing(&config.logging);

    let outcome = match args.command {
        Command::Disasters { state, county, output } => {
            let client = FemaClient::new(&config.fema)?;
            export_disasters(&client, &DisasterQuery::new(state, county), &output).await?
        }
        Command::Risk { lat, lon, output, flatten } => {
            config.require_lightbox_key()?;
            let client = LightBoxClient::new(&config.lightbox)?;
            export_risk(&client, GeoPoint::new(lat, lon), flatten, &output).await?
        }
    };

    match outcome {
        ExportOutcome::Written(path) => tracing::info!(path = %path.display(), "export complete"),
        ExportOutcome::Skipped { status } => tracing::warn!(status, "export skipped"),
    }
    Ok(())
}
