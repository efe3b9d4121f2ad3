//! Writing provider responses to disk.
//!
//! The export tool persists whatever the provider returned. A provider that
//! answers with an error status is logged and skipped, not treated as a
//! failure of the tool; anything that prevents reaching the provider at all
//! is returned as an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{error, info};

use hs_core::types::GeoPoint;
use hs_nris::flatten_json;
use hs_providers::{DisasterQuery, FemaClient, ProviderError, RiskFetcher};

/// What happened to one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The document was written to this path.
    Written(PathBuf),
    /// The provider rejected the request; nothing was written.
    Skipped { status: u16 },
}

/// Write `value` as pretty-printed JSON with a trailing newline, creating
/// parent directories as needed.
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let mut text = serde_json::to_string_pretty(value).context("failed to serialize document")?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Persist a provider result to `path`.
pub fn export_document(result: Result<Value, ProviderError>, path: &Path) -> Result<ExportOutcome> {
    match result {
        Ok(document) => {
            write_json(path, &document)?;
            info!(path = %path.display(), "document written");
            Ok(ExportOutcome::Written(path.to_path_buf()))
        }
        Err(err) => match err.status() {
            Some(status) => {
                error!(
                    provider = err.provider(),
                    status,
                    error = %err,
                    "provider returned an error, nothing written"
                );
                Ok(ExportOutcome::Skipped { status })
            }
            None => Err(err.into()),
        },
    }
}

/// `hs-export disasters`: save the raw OpenFEMA summaries for `query`.
pub async fn export_disasters(
    client: &FemaClient,
    query: &DisasterQuery,
    output: &Path,
) -> Result<ExportOutcome> {
    info!(filter = %query.filter(), "querying OpenFEMA");
    export_document(client.disaster_summaries(query).await, output)
}

/// `hs-export risk`: save the RiskIndexes document for `point`, raw or
/// flattened.
pub async fn export_risk(
    fetcher: &dyn RiskFetcher,
    point: GeoPoint,
    flatten: bool,
    output: &Path,
) -> Result<ExportOutcome> {
    info!(wkt = %point.wkt(), flatten, "querying LightBox");
    let result = fetcher
        .fetch(point)
        .await
        .map(|document| if flatten { flatten_json(&document) } else { document });
    export_document(result, output)
}
