//! Spherical geometry for route synthesis and distance calculations.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers to nautical miles.
pub const KM_TO_NM: f64 = 0.539957;

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Great-circle distance to another point in nautical miles.
    pub fn distance_nm(&self, other: &GeoPoint) -> f64 {
        distance_nm(*self, *other)
    }
}

/// Calculate distance between two points in nautical miles (Haversine formula).
///
/// The Earth is treated as a sphere of radius [`EARTH_RADIUS_KM`]; the result
/// is converted from kilometers with [`KM_TO_NM`].
///
/// # Arguments
/// * `a`, `b` - Coordinates in decimal degrees
///
/// # Returns
/// Distance in nautical miles. Symmetric and zero for coincident points.
pub fn distance_nm(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c * KM_TO_NM
}

/// Sum of leg distances along an ordered path, in nautical miles.
pub fn path_length_nm(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|leg| distance_nm(leg[0], leg[1]))
        .sum()
}

/// Initial bearing from `a` to `b` in degrees, 0 = north, 90 = east.
pub fn bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    x.atan2(y).to_degrees().rem_euclid(360.0)
}

/// Offset a position by distance and bearing.
///
/// # Arguments
/// * `origin` - Starting position
/// * `distance_nm` - Distance in nautical miles
/// * `bearing_deg` - Bearing in degrees (0 = north, 90 = east)
pub fn offset(origin: GeoPoint, distance_nm: f64, bearing_deg: f64) -> GeoPoint {
    if distance_nm.abs() <= f64::EPSILON {
        return origin;
    }

    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let bearing_rad = bearing_deg.to_radians();
    let angular_distance = distance_nm / KM_TO_NM / EARTH_RADIUS_KM;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lon2 = lon1 + y.atan2(x);
    lon2 =
        (lon2 + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI;

    GeoPoint::new(lon2.to_degrees(), lat2.to_degrees())
}

/// Linear interpolation in latitude/longitude, `t` in `[0, 1]`.
pub fn lerp(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    GeoPoint::new(
        a.longitude + t * (b.longitude - a.longitude),
        a.latitude + t * (b.latitude - a.latitude),
    )
}

/// Smallest absolute difference between two headings, in degrees.
pub fn heading_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}
