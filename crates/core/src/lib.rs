//! # hs-core
//!
//! Shared building blocks for the hazardscope workspace: layered
//! configuration, the tracing setup used by every binary, and the small
//! geographic types passed between the provider clients and the HTTP layer.

pub mod config;
pub mod logging;
pub mod types;
