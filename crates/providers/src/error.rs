//! Provider failure taxonomy.

use thiserror::Error;

/// Why a provider call did not produce a JSON document.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never completed: DNS, connect, TLS, timeout or body read.
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        source: reqwest::Error,
    },
    /// The provider answered with a non-2xx status.
    #[error("{provider} HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    /// The provider answered 2xx but the body is not JSON.
    #[error("{provider} returned invalid JSON: {source}")]
    Decode {
        provider: &'static str,
        source: serde_json::Error,
    },
}

impl ProviderError {
    /// HTTP status for [`ProviderError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Name of the provider that failed.
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Transport { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Decode { provider, .. } => *provider,
        }
    }
}
