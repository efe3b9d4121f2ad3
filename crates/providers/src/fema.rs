//! OpenFEMA disaster declaration summaries client.
//!
//! `GET {base}/v2/DisasterDeclarationsSummaries?$filter=<OData filter>`
//! returns every declaration whose designated area matches the filter. No
//! authentication is required. The response is returned raw; OpenFEMA pages
//! large result sets and only the first page is fetched.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use hs_core::config::FemaConfig;

use crate::error::ProviderError;
use crate::http::{build_client, send_json};

const PROVIDER: &str = "OpenFEMA";
const SUMMARIES_PATH: &str = "/v2/DisasterDeclarationsSummaries";

/// A county-level declarations query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisasterQuery {
    /// Two-letter state code, e.g. `TX`.
    pub state: String,
    /// County name, with or without the `(County)` qualifier.
    pub county: String,
}

impl DisasterQuery {
    pub fn new(state: impl Into<String>, county: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            county: county.into(),
        }
    }

    /// OpenFEMA designated-area name. Counties are listed as
    /// `Harris (County)`, parishes as `Orleans (Parish)` and so on; a name that
    /// already ends in a qualifier is kept as given.
    pub fn designated_area(&self) -> String {
        let county = self.county.trim();
        if county.ends_with(')') {
            county.to_string()
        } else {
            format!("{} (County)", county)
        }
    }

    /// OData `$filter` expression. Single quotes in values are doubled.
    pub fn filter(&self) -> String {
        format!(
            "state eq '{}' and designatedArea eq '{}'",
            odata_escape(&self.state.trim().to_uppercase()),
            odata_escape(&self.designated_area())
        )
    }
}

fn odata_escape(value: &str) -> String {
    value.replace('\'', "''")
}

/// OpenFEMA client.
pub struct FemaClient {
    endpoint: Url,
    client: Client,
}

impl FemaClient {
    /// Create a client from configuration. Fails if the base URL is invalid.
    pub fn new(config: &FemaConfig) -> Result<Self> {
        let raw = format!("{}{}", config.base_url.trim_end_matches('/'), SUMMARIES_PATH);
        let endpoint = Url::parse(&raw)
            .with_context(|| format!("invalid OpenFEMA base URL: {}", config.base_url))?;
        Ok(Self {
            endpoint,
            client: build_client(Duration::from_millis(config.timeout_ms))?,
        })
    }

    /// Full request URL for `query`, with the filter form-encoded.
    pub fn summaries_url(&self, query: &DisasterQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("$filter", &query.filter());
        url
    }

    /// Fetch the raw declaration summaries for `query`.
    pub async fn disaster_summaries(&self, query: &DisasterQuery) -> Result<Value, ProviderError> {
        let url = self.summaries_url(query);
        debug!(state = %query.state, county = %query.county, "OpenFEMA GET disaster summaries");
        send_json(PROVIDER, self.client.get(url)).await
    }
}
