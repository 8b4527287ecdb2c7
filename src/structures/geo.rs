use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by every distance in the planner, in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        LatLng {
            latitude,
            longitude,
        }
    }

    /// Haversine distance in km.
    pub fn dist(&self, other: Self) -> f64 {
        haversine(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }
}

fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_latitude = (lat2 - lat1).to_radians();
    let delta_longitude = (lon2 - lon1).to_radians();

    let a = (delta_latitude / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_longitude / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_point_is_zero() {
        let p = LatLng::new(23.8103, 90.4125);
        assert_eq!(p.dist(p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((a.dist(b) - expected).abs() < 1e-9);
    }

    #[test]
    fn validity() {
        assert!(LatLng::new(-90.0, 180.0).is_valid());
        assert!(!LatLng::new(90.5, 0.0).is_valid());
        assert!(!LatLng::new(0.0, f64::NAN).is_valid());
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..90.0,
            lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0,
            lon2 in -180.0f64..180.0,
        ) {
            let a = LatLng::new(lat1, lon1);
            let b = LatLng::new(lat2, lon2);
            prop_assert_eq!(a.dist(b), b.dist(a));
            prop_assert!(a.dist(b) >= 0.0);
        }
    }
}
