//! # hs-providers
//!
//! Clients for the external data providers: LightBox RiskIndexes (per-point
//! National Risk Index records) and OpenFEMA (disaster declaration
//! summaries). Both hand back the parsed JSON body untouched; reshaping is
//! the job of `hs-nris`.
//!
//! Failures are reported as [`ProviderError`] and never retried.

pub mod error;
pub mod fema;
pub mod fetcher;
pub mod http;
pub mod lightbox;

pub use error::ProviderError;
pub use fema::{DisasterQuery, FemaClient};
pub use fetcher::RiskFetcher;
pub use lightbox::LightBoxClient;
