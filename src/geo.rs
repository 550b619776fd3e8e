//! Great-circle distances between latitude/longitude points.
//!
//! Builds a [`DistanceMatrix`] in kilometres when no road-network service
//! is available.

use crate::aco::DistanceMatrix;
use crate::error::Result;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Haversine distance between `a` and `b` in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin() * EARTH_RADIUS_KM
}

/// Symmetric haversine matrix over `points`.
///
/// # Errors
/// Fails like [`DistanceMatrix::new`]: fewer than two points, or two
/// points at the same location (zero distance).
pub fn distance_matrix(points: &[GeoPoint]) -> Result<DistanceMatrix> {
    DistanceMatrix::from_fn(points.len(), |i, j| haversine_km(points[i], points[j]))
}
