use caremap_core::models::Coordinate;

pub use caremap_core::models::EARTH_RADIUS_KM;

/// Great-circle distance in kilometers between two lat/lon points in degrees
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
/// Total: identical points give 0 and any two valid degree pairs give a
/// finite, non-negative result.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` slightly outside [0, 1] for antipodal or identical points
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Haversine distance between two coordinates
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    haversine_km(a.lat, a.lon, b.lat, b.lon)
}
