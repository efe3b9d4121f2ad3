//! Request plumbing shared by the provider clients.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::error::ProviderError;

/// User agent sent with every provider request.
pub const USER_AGENT: &str = concat!("hazardscope/", env!("CARGO_PKG_VERSION"));

/// Build a pooled client with a whole-request timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")
}

/// Send `request` and parse the body as JSON.
///
/// The body is read as text first so that a non-2xx answer keeps the
/// provider's error message.
pub async fn send_json(provider: &'static str, request: RequestBuilder) -> Result<Value, ProviderError> {
    let resp = request
        .send()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|source| ProviderError::Transport { provider, source })?;

    if !status.is_success() {
        // The body may echo request headers; callers redact it before logging.
        debug!(provider, status = status.as_u16(), "provider returned error status");
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| ProviderError::Decode { provider, source })
}
