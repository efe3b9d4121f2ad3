//! Layered configuration for hazardscope.
//!
//! Configuration is loaded in layers with increasing priority:
//! 1. Compiled-in defaults (public provider endpoints, local bind address)
//! 2. TOML configuration file (if provided)
//! 3. Environment variable overrides (prefix `HAZARDSCOPE_`, nested with `__`)
//! 4. The dedicated `LIGHTBOX_APIKEY` env var for the LightBox API key
//!
//! The LightBox key **must** come from the environment (or a `.env` file the
//! binaries load before calling [`AppConfig::load`]), never from a
//! configuration file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Env var holding the LightBox API key.
pub const LIGHTBOX_APIKEY_ENV: &str = "LIGHTBOX_APIKEY";

// ── Default value functions ────────────────────────────────────────────

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Default upstream request timeout: 10 000 ms.
fn default_timeout_ms() -> u64 {
    10_000
}

/// Default search buffer around the queried point: 50 (meters).
fn default_buffer_distance() -> f64 {
    50.0
}

fn default_buffer_unit() -> String {
    "m".to_string()
}

fn default_log_filter() -> String {
    "hs_api=info,hs_providers=info,hs_core=info".to_string()
}

// ── Configuration structs ──────────────────────────────────────────────

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// LightBox RiskIndexes connection settings.
    pub lightbox: LightBoxConfig,
    /// OpenFEMA connection settings.
    pub fema: FemaConfig,
    /// Log output format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// LightBox RiskIndexes API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LightBoxConfig {
    /// REST API base URL, without trailing slash.
    pub base_url: String,
    /// API key sent as `x-api-key`. Loaded from `LIGHTBOX_APIKEY`.
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Radius of the geometry buffer drawn around the queried point.
    #[serde(default = "default_buffer_distance")]
    pub buffer_distance: f64,
    /// Unit of `buffer_distance`, as understood by the provider (`m`, `km`, ...).
    #[serde(default = "default_buffer_unit")]
    pub buffer_unit: String,
}

/// OpenFEMA API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FemaConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON logs instead of pretty-printed ones.
    #[serde(default)]
    pub json: bool,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration using layered sources.
    ///
    /// 1. Compiled-in defaults.
    /// 2. TOML file at `config_path` (if `Some`).
    /// 3. Environment variable overrides with prefix `HAZARDSCOPE_` and `__`
    ///    as the nesting separator (e.g., `HAZARDSCOPE_SERVER__PORT=9000`).
    /// 4. `LIGHTBOX_APIKEY` for the LightBox key.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder()
            // ── Layer 1: compiled-in defaults ───────────────────────
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("lightbox.base_url", "https://api.lightboxre.com")?
            .set_default("lightbox.api_key", "")?
            .set_default("lightbox.timeout_ms", default_timeout_ms() as i64)?
            .set_default("lightbox.buffer_distance", default_buffer_distance())?
            .set_default("lightbox.buffer_unit", default_buffer_unit())?
            .set_default("fema.base_url", "https://www.fema.gov/api/open")?
            .set_default("fema.timeout_ms", default_timeout_ms() as i64)?
            .set_default("logging.json", false)?
            .set_default("logging.filter", default_log_filter())?;

        // ── Layer 2: TOML file ─────────────────────────────────────
        if let Some(path) = config_path {
            let path_str = path
                .to_str()
                .context("config path is not valid UTF-8")?;
            builder = builder.add_source(File::with_name(path_str).required(true));
        }

        // ── Layer 3: env var overrides (HAZARDSCOPE_ prefix) ──────
        // The prefix separator is set explicitly: with a `__` nesting
        // separator the `config` crate would otherwise expect `HAZARDSCOPE__`.
        builder = builder.add_source(
            Environment::with_prefix("HAZARDSCOPE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut cfg: AppConfig = builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        // ── Layer 4: dedicated API key env var ─────────────────────
        if let Ok(v) = std::env::var(LIGHTBOX_APIKEY_ENV) {
            cfg.lightbox.api_key = v;
        }

        cfg.validate()?;

        Ok(cfg)
    }

    /// Fail unless a LightBox API key is configured.
    ///
    /// Only binaries that actually talk to LightBox call this, so the FEMA
    /// exporter runs without a key.
    pub fn require_lightbox_key(&self) -> Result<()> {
        if self.lightbox.api_key.trim().is_empty() {
            bail!("LightBox API key is required: set {}", LIGHTBOX_APIKEY_ENV);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.lightbox.timeout_ms == 0 || self.fema.timeout_ms == 0 {
            bail!("request timeouts must be greater than zero");
        }
        let distance = self.lightbox.buffer_distance;
        if !distance.is_finite() || distance <= 0.0 {
            bail!("lightbox.buffer_distance must be a positive number, got {}", distance);
        }
        if self.lightbox.buffer_unit.trim().is_empty() {
            bail!("lightbox.buffer_unit must not be empty");
        }
        Ok(())
    }
}
