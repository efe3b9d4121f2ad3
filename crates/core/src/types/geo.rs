//! Geographic coordinates.

use std::fmt;

use serde::Deserialize;

/// A WGS84 point in decimal degrees.
///
/// Deserializes from `{"lat": .., "lon": ..}`, which is also the shape of the
/// `/api/risk` query string.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPoint {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Well-known-text rendering. WKT orders coordinates as `x y`, i.e.
    /// longitude first.
    pub fn wkt(&self) -> String {
        format!("POINT({} {})", self.lon, self.lat)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}
