//! # hs-nris
//!
//! Flattening of National Risk Index Summary (NRIS) documents as returned by
//! the LightBox RiskIndexes API.
//!
//! The provider nests every metric a few levels deep and may omit any of
//! them. [`flatten`] walks the first `nris` record with total lookups and
//! produces a [`FlatRiskRecord`] with a fixed shape: five summary fields plus
//! one [`HazardSummary`] for each of the eighteen [`HazardType`]s. Missing
//! data becomes JSON `null`; nothing in this crate fails on input shape.

pub mod flatten;
pub mod hazard;
pub mod lookup;

pub use flatten::{flatten, flatten_json, FlatRiskRecord, HazardSummary};
pub use hazard::HazardType;
