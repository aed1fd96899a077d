use super::error::RoutingError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,long"`. Parts are not trimmed.
impl FromStr for Coordinate {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [lat, long] = parts.as_slice() else {
            return Err(RoutingError::CoordinateArity {
                input: s.to_string(),
                parts: parts.len(),
            });
        };
        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|source| RoutingError::CoordinateNumber {
                    input: s.to_string(),
                    part: part.to_string(),
                    source,
                })
        };
        Ok(Self::new(parse(*lat)?, parse(*long)?))
    }
}

// --- Wire shape: {"location":{"latLng":{...}}} ---
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLngLocation {
    pub lat_lng: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub location: LatLngLocation,
}

impl From<Coordinate> for Waypoint {
    fn from(coord: Coordinate) -> Self {
        Self {
            location: LatLngLocation { lat_lng: coord },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(51.5, -0.1)]
    #[case(-33.8688, 151.2093)]
    #[case(0.0, 0.0)]
    #[case(37.419734, -122.0827784)]
    fn formatted_coordinate_parses_back(#[case] latitude: f64, #[case] longitude: f64) {
        let coord = Coordinate::new(latitude, longitude);

        let parsed: Coordinate = coord.to_string().parse().expect("should parse");

        assert_eq!(parsed, coord);
    }

    #[rstest]
    #[case("")]
    #[case("51.5")]
    #[case("51.5;-0.1")]
    #[case("51.5,-0.1,3")]
    fn wrong_part_count_is_rejected(#[case] input: &str) {
        let err = input.parse::<Coordinate>().expect_err("should fail");

        assert!(matches!(err, RoutingError::CoordinateArity { .. }), "{err:?}");
    }

    #[rstest]
    #[case("north,-0.1")]
    #[case("51.5,west")]
    #[case("51.5, -0.1")]
    #[case(",")]
    fn non_numeric_part_is_rejected(#[case] input: &str) {
        let err = input.parse::<Coordinate>().expect_err("should fail");

        assert!(matches!(err, RoutingError::CoordinateNumber { .. }), "{err:?}");
    }

    #[rstest]
    fn waypoint_serialises_nested_lat_lng() {
        let waypoint = Waypoint::from(Coordinate::new(1.5, 2.25));

        let json = serde_json::to_value(waypoint).expect("should serialise");

        assert_eq!(
            json,
            serde_json::json!({"location": {"latLng": {"latitude": 1.5, "longitude": 2.25}}})
        );
    }
}
