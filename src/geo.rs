//! Great-circle distance and inferred travel time.
//!
//! Travel time never appears in dispatch data, so it is estimated from
//! geography: haversine distance at a constant average speed, with a
//! minute floor so even co-located jobs get a visible leg.
//!
//! # Reference
//! Sinnott (1984), "Virtues of the Haversine", Sky and Telescope 68(2)

use serde::{Deserialize, Serialize};

/// Mean Earth radius (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default average road speed (km/h).
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// A WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude (degrees).
    pub lat: f64,
    /// Longitude (degrees).
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate only when both components are present.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        Some(Self::new(lat?, lng?))
    }

    /// Whether both components are finite and within WGS-84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Distance to another point (km).
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Haversine distance between two coordinates (km).
///
/// ```
/// use callout_timeline::geo::distance_km;
///
/// let d = distance_km(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111.19).abs() < 0.5);
/// ```
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Travel minutes for a distance at [`DEFAULT_SPEED_KMH`], floored at `min_floor_minutes`.
pub fn travel_minutes(distance_km: f64, min_floor_minutes: f64) -> f64 {
    travel_minutes_at(distance_km, DEFAULT_SPEED_KMH, min_floor_minutes)
}

/// Travel minutes for a distance at an explicit speed (km/h).
///
/// Non-positive speeds degrade to the floor.
pub fn travel_minutes_at(distance_km: f64, speed_kmh: f64, min_floor_minutes: f64) -> f64 {
    if speed_kmh <= 0.0 {
        return min_floor_minutes;
    }
    (distance_km / speed_kmh * 60.0).max(min_floor_minutes)
}
