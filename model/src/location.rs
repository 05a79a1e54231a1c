use serde::{Deserialize, Serialize};

use crate::InvalidInput;

/// Downtown Minneapolis, matching the backend's own test fixtures. Used
/// when no position source is available at all.
pub const DEFAULT_LOCATION: Location = Location {
    lat: 44.9778,
    lon: -93.2650,
};

/// A validated (latitude, longitude) pair. The constructors enforce the
/// coordinate ranges, so holding one means it's usable in a query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidInput> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidInput::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidInput::LongitudeOutOfRange);
        }
        Ok(Self { lat, lon })
    }

    /// Manual entry. Surrounding whitespace is fine; anything else has to
    /// parse as a number in range.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, InvalidInput> {
        Self::new(parse_coord(lat)?, parse_coord(lon)?)
    }

    pub fn describe(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lon)
    }
}

fn parse_coord(raw: &str) -> Result<f64, InvalidInput> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| InvalidInput::NotANumber(trimmed.to_string()))
}

/// Where the current location came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum LocationSource {
    /// A position fix handed to the process when it started
    Device,
    /// Typed in by hand
    Manual,
    /// The center of the map viewport
    MapCenter,
    /// The built-in default, when nothing better exists
    Fallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(Location::new(44.9778, -93.2650).is_ok());
        // Boundaries are inclusive
        assert!(Location::new(90.0, 180.0).is_ok());
        assert!(Location::new(-90.0, -180.0).is_ok());

        assert_eq!(
            Location::new(90.1, 0.0),
            Err(InvalidInput::LatitudeOutOfRange)
        );
        assert_eq!(
            Location::new(0.0, -180.5),
            Err(InvalidInput::LongitudeOutOfRange)
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Location::parse(" 44.9778 ", "-93.2650"),
            Ok(Location {
                lat: 44.9778,
                lon: -93.2650
            })
        );
        assert_eq!(
            Location::parse("forty-four", "-93.0"),
            Err(InvalidInput::NotANumber("forty-four".to_string()))
        );
        // f64::from_str accepts "NaN", but it's not a coordinate
        assert!(Location::parse("NaN", "0").is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(DEFAULT_LOCATION.describe(), "44.977800, -93.265000");
    }
}
