//! Geographic coordinates with range validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a latitude/longitude pair was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinatesError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A validated latitude/longitude pair.
///
/// Fields are private so that an out-of-range value can only be rejected at
/// construction (or deserialization), never observed later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = CoordinatesError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Builds coordinates, rejecting values outside the WGS84 ranges (and NaN).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Coordinates(latitude={}, longitude={})",
            self.latitude, self.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(
            Coordinates::new(90.5, 0.0),
            Err(CoordinatesError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            Coordinates::new(0.0, -180.1),
            Err(CoordinatesError::LongitudeOutOfRange(-180.1))
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinates =
            serde_json::from_str(r#"{"latitude": 40.7128, "longitude": -74.006}"#).unwrap();
        assert_eq!(ok.latitude(), 40.7128);
        assert_eq!(ok.longitude(), -74.006);

        let bad = serde_json::from_str::<Coordinates>(r#"{"latitude": 91, "longitude": 0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let c = Coordinates::new(1.5, -2.25).unwrap();
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 1.5, "longitude": -2.25}));
    }

    #[test]
    fn test_display() {
        let c = Coordinates::new(1.5, 2.0).unwrap();
        assert_eq!(c.to_string(), "Coordinates(latitude=1.5, longitude=2)");
    }
}
