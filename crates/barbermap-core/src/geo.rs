//! Great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by every distance in the crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84-style latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance to `other` in kilometers.
    #[must_use]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Anything that sits at a single point on the map.
///
/// The opportunity scan only needs coordinates, so shop records, user pins,
/// and bare points all feed it through this trait.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

/// Haversine great-circle distance in kilometers between two points given in degrees.
///
/// `a` is clamped into `[0, 1]` so float error near antipodal points cannot
/// push `sqrt(1 - a)` into NaN. In-range values are untouched.
#[must_use]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = ((d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOFIA_CENTER: GeoPoint = GeoPoint::new(42.6977, 23.3219);
    const SOFIA_SOUTH_EAST: GeoPoint = GeoPoint::new(42.6507, 23.3784);

    #[test]
    fn identical_points_are_zero_apart() {
        let d = SOFIA_CENTER.distance_km(&SOFIA_CENTER);
        assert!(d.abs() < f64::EPSILON, "got {d}");
        assert!(!d.is_nan());
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (SOFIA_CENTER, SOFIA_SOUTH_EAST),
            (GeoPoint::new(0.0, 0.0), GeoPoint::new(-33.9, 151.2)),
            (GeoPoint::new(89.9, 10.0), GeoPoint::new(-89.9, -170.0)),
        ];
        for (p, q) in pairs {
            let forward = p.distance_km(&q);
            let backward = q.distance_km(&p);
            assert!((forward - backward).abs() < 1e-9, "{forward} vs {backward}");
        }
    }

    #[test]
    fn sofia_reference_distance_matches_haversine() {
        // Independent evaluation of the same formula, step by step.
        let phi1 = 42.6977_f64.to_radians();
        let phi2 = 42.6507_f64.to_radians();
        let d_phi = (42.6507_f64 - 42.6977).to_radians();
        let d_lambda = (23.3784_f64 - 23.3219).to_radians();
        let h = (d_phi / 2.0).sin() * (d_phi / 2.0).sin()
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin() * (d_lambda / 2.0).sin();
        let reference = 2.0 * EARTH_RADIUS_KM * h.sqrt().asin();

        let d = SOFIA_CENTER.distance_km(&SOFIA_SOUTH_EAST);
        assert!(((d - reference) / reference).abs() < 0.001, "{d} vs {reference}");
        assert!(d > 6.5 && d < 7.5, "expected roughly 7 km, got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!(!d.is_nan());
        assert!((d - half).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_km(42.0, 23.0, 43.0, 23.0);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn reference_through_located_is_transparent() {
        let p = &SOFIA_CENTER;
        assert_eq!(p.location(), SOFIA_CENTER);
    }
}
