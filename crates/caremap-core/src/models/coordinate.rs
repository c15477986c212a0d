//! Geographic positions used by every entity.
//!
//! Positions are stored as latitude/longitude in degrees (WGS 84). The
//! `geo` crate uses x = longitude, y = latitude, so conversions swap the order.

use crate::error::{CareMapError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Mean Earth radius used by every distance in CareMap
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude on the CareMap sphere
pub const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * PI / 180.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn try_new(lat: f64, lon: f64) -> Result<Self> {
        let coordinate = Self::new(lat, lon);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(CareMapError::InvalidCoordinate { lat, lon })
        }
    }

    /// Check that latitude is in [-90, 90] and longitude in [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Convert to a `geo::Point` (x = lon, y = lat)
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }

    /// Coordinate array in `[lon, lat]` order, as GeoJSON and R-tree envelopes expect
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_accepts_region() {
        let base = Coordinate::try_new(12.1289, 78.1578).unwrap();
        assert_eq!(base.lat, 12.1289);
        assert_eq!(base.lon, 78.1578);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(Coordinate::try_new(91.0, 0.0).is_err());
        assert!(Coordinate::try_new(0.0, -180.5).is_err());
        assert!(Coordinate::try_new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::try_new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_point_conversion_swaps_axes() {
        let coordinate = Coordinate::new(12.5, 78.0);
        let point = coordinate.to_point();
        assert_eq!(point.x(), 78.0);
        assert_eq!(point.y(), 12.5);
        assert_eq!(Coordinate::from(point), coordinate);
        assert_eq!(coordinate.lon_lat(), [78.0, 12.5]);
    }
}
