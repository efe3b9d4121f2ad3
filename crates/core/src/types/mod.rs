//! Types shared between the provider clients and the HTTP layer.

pub mod geo;

pub use geo::GeoPoint;
