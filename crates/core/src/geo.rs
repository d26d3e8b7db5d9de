//! Coordinate validation and great-circle distance for clinic lookup.

use crate::error::CoreError;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default search radius for nearby clinic lookup.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Largest accepted search radius.
pub const MAX_RADIUS_KM: f64 = 100.0;

/// Reject latitude/longitude pairs outside the valid range.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "latitude must be between -90 and 90 (got {latitude})"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "longitude must be between -180 and 180 (got {longitude})"
        )));
    }
    Ok(())
}

/// Haversine distance between two points, in kilometres.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Clamp a requested radius to `(0, MAX_RADIUS_KM]`.
pub fn clamp_radius(radius_km: Option<f64>) -> f64 {
    match radius_km {
        Some(r) if r.is_finite() && r > 0.0 => r.min(MAX_RADIUS_KM),
        _ => DEFAULT_RADIUS_KM,
    }
}
