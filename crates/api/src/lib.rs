//! # hs-api
//!
//! The risk lookup HTTP service and the provider export tool. Library
//! interface for the binaries and integration tests.

pub mod export;
pub mod server;
