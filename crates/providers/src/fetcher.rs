//! Risk fetcher trait.
//!
//! The HTTP layer depends on [`RiskFetcher`] rather than on
//! [`LightBoxClient`] directly, so handlers can be exercised against an
//! in-memory fetcher.

use async_trait::async_trait;
use serde_json::Value;

use hs_core::types::GeoPoint;

use crate::error::ProviderError;
use crate::lightbox::LightBoxClient;

/// Source of raw RiskIndexes documents.
#[async_trait]
pub trait RiskFetcher: Send + Sync {
    /// Fetch the document for `point`. Any HTTP-level failure, including a
    /// non-2xx status, is an error; a returned document is a 2xx body.
    async fn fetch(&self, point: GeoPoint) -> Result<Value, ProviderError>;
}

#[async_trait]
impl RiskFetcher for LightBoxClient {
    async fn fetch(&self, point: GeoPoint) -> Result<Value, ProviderError> {
        self.risk_indexes(point).await
    }
}
