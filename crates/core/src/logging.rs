//! Tracing setup shared by the hazardscope binaries.
//!
//! [`init_tracing`] installs one `fmt` layer, JSON or pretty depending on
//! [`LoggingConfig::json`]. The filter comes from `RUST_LOG` when set and
//! from [`LoggingConfig::filter`] otherwise.
//!
//! Provider error bodies are logged and returned to HTTP clients verbatim,
//! and some upstream gateways echo request headers back in them; run them
//! through [`redact_secret`] first.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Replacement text for redacted secrets.
pub const REDACTED: &str = "[REDACTED]";

/// Install the global subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_timer(UtcMicros)
                    .with_current_span(false),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty().with_timer(UtcMicros))
            .init();
    }
}

/// RFC 3339 UTC timestamps with microsecond precision.
#[derive(Debug, Clone, Copy)]
struct UtcMicros;

impl FormatTime for UtcMicros {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.write_str(&Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

/// Replace every occurrence of `secret` in `text` with [`REDACTED`].
///
/// An empty or whitespace-only secret leaves `text` untouched.
pub fn redact_secret(text: &str, secret: &str) -> String {
    let secret = secret.trim();
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, REDACTED)
}
