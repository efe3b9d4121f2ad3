//! LightBox RiskIndexes API client.
//!
//! Queries the National Risk Index records intersecting a small buffer around
//! a point: `GET /v1/riskindexes/us/geometry?wkt=POINT(lon lat)&bufferDistance=..&bufferUnit=..`,
//! authenticated with an `x-api-key` header.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use hs_core::config::LightBoxConfig;
use hs_core::logging::redact_secret;
use hs_core::types::GeoPoint;

use crate::error::ProviderError;
use crate::http::{build_client, send_json};

const PROVIDER: &str = "LightBox";
const GEOMETRY_PATH: &str = "/v1/riskindexes/us/geometry";

/// LightBox RiskIndexes client.
///
/// Reuses a single `reqwest::Client` for connection pooling across requests.
pub struct LightBoxClient {
    endpoint: Url,
    api_key: String,
    buffer_distance: f64,
    buffer_unit: String,
    client: Client,
}

impl LightBoxClient {
    /// Create a client from configuration. Fails if the base URL is invalid.
    pub fn new(config: &LightBoxConfig) -> Result<Self> {
        let raw = format!("{}{}", config.base_url.trim_end_matches('/'), GEOMETRY_PATH);
        let endpoint = Url::parse(&raw)
            .with_context(|| format!("invalid LightBox base URL: {}", config.base_url))?;
        Ok(Self {
            endpoint,
            api_key: config.api_key.clone(),
            buffer_distance: config.buffer_distance,
            buffer_unit: config.buffer_unit.clone(),
            client: build_client(Duration::from_millis(config.timeout_ms))?,
        })
    }

    /// Full request URL for `point`.
    ///
    /// The WKT is percent-encoded by hand (`%20` for the space, which form
    /// encoding would turn into `+`); the buffer parameters are form-encoded.
    pub fn risk_url(&self, point: GeoPoint) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!("wkt=POINT%28{}%20{}%29", point.lon, point.lat)));
        url.query_pairs_mut()
            .append_pair("bufferDistance", &self.buffer_distance.to_string())
            .append_pair("bufferUnit", &self.buffer_unit);
        url
    }

    /// Fetch the raw RiskIndexes document for `point`.
    ///
    /// Error bodies have the API key redacted, since they end up in logs and
    /// in HTTP responses.
    pub async fn risk_indexes(&self, point: GeoPoint) -> Result<Value, ProviderError> {
        let url = self.risk_url(point);
        debug!(wkt = %point.wkt(), "LightBox GET risk indexes");

        let mut request = self.client.get(url);
        if !self.api_key.is_empty() {
            request = request.header("x-api-key", &self.api_key);
        }
        send_json(PROVIDER, request).await.map_err(|err| match err {
            ProviderError::Status { provider, status, body } => ProviderError::Status {
                provider,
                status,
                body: redact_secret(&body, &self.api_key),
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> LightBoxConfig {
        LightBoxConfig {
            base_url: base_url.to_string(),
            api_key: "test_key".to_string(),
            timeout_ms: 1_000,
            buffer_distance: 50.0,
            buffer_unit: "m".to_string(),
        }
    }

    #[test]
    fn test_risk_url() {
        let client = LightBoxClient::new(&config("https://api.lightboxre.com")).unwrap();
        let url = client.risk_url(GeoPoint::new(43.6568, -79.4512));
        assert_eq!(
            url.as_str(),
            "https://api.lightboxre.com/v1/riskindexes/us/geometry?wkt=POINT%28-79.4512%2043.6568%29&bufferDistance=50&bufferUnit=m"
        );
    }

    #[test]
    fn test_risk_url_trims_trailing_slash() {
        let client = LightBoxClient::new(&config("http://localhost:4000/")).unwrap();
        let url = client.risk_url(GeoPoint::new(1.0, 2.0));
        assert_eq!(url.path(), "/v1/riskindexes/us/geometry");
    }

    #[test]
    fn test_risk_url_uses_configured_buffer() {
        let mut cfg = config("http://localhost:4000");
        cfg.buffer_distance = 0.25;
        cfg.buffer_unit = "km".to_string();
        let client = LightBoxClient::new(&cfg).unwrap();
        let url = client.risk_url(GeoPoint::new(1.0, 2.0));
        assert!(url.as_str().ends_with("&bufferDistance=0.25&bufferUnit=km"));
    }

    #[test]
    fn test_risk_url_encodes_buffer_unit() {
        let mut cfg = config("http://localhost:4000");
        cfg.buffer_unit = "m&apikey=x".to_string();
        let client = LightBoxClient::new(&cfg).unwrap();
        let url = client.risk_url(GeoPoint::new(1.0, 2.0));

        assert!(url.as_str().ends_with("&bufferUnit=m%26apikey%3Dx"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("wkt".to_string(), "POINT(2 1)".to_string()));
        assert_eq!(pairs[2], ("bufferUnit".to_string(), "m&apikey=x".to_string()));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(LightBoxClient::new(&config("not a url")).is_err());
    }
}
