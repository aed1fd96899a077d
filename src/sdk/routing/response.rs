use super::duration::TravelDuration;
use super::error::RoutingError;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub duration: TravelDuration,
}

impl Route {
    pub fn new(duration: TravelDuration) -> Self {
        Self { duration }
    }
}

/// Routes returned by `computeRoutes`. Never empty once decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub routes: Vec<Route>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Route>, D::Error> {
    Ok(Option::<Vec<Route>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RouteResponse {
    /// Decodes a raw body, rejecting responses without any route.
    /// A `null` body or `null` routes count as no routes.
    pub fn decode(body: &str) -> Result<Self, RoutingError> {
        let decoded: Option<RouteResponse> = serde_json::from_str(body).map_err(|e| {
            log::error!("Failed to parse RouteResponse.\nError: {}. Body: {}", e, body);
            RoutingError::Decode(e)
        })?;
        let response = decoded.unwrap_or(RouteResponse { routes: Vec::new() });
        if response.routes.is_empty() {
            return Err(RoutingError::NoRoutes {
                body: body.to_string(),
            });
        }
        Ok(response)
    }

    /// The smallest duration; ties keep the earliest route.
    pub fn shortest(&self) -> Option<TravelDuration> {
        shortest_duration(&self.routes)
    }
}

pub fn shortest_duration(routes: &[Route]) -> Option<TravelDuration> {
    let (first, rest) = routes.split_first()?;
    let mut best = first.duration;
    for route in rest {
        if route.duration < best {
            best = route.duration;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn routes(secs: &[i64]) -> Vec<Route> {
        secs.iter()
            .map(|&s| Route::new(TravelDuration::from_secs(s)))
            .collect()
    }

    #[rstest]
    #[case(&[300, 120, 450], 120)]
    #[case(&[42], 42)]
    #[case(&[60, 60, 90], 60)]
    #[case(&[900, 600, 600], 600)]
    fn selects_minimum_duration(#[case] secs: &[i64], #[case] expected: i64) {
        assert_eq!(
            shortest_duration(&routes(secs)),
            Some(TravelDuration::from_secs(expected))
        );
    }

    #[rstest]
    fn no_routes_selects_nothing() {
        assert_eq!(shortest_duration(&[]), None);
    }

    #[rstest]
    fn decodes_mixed_duration_encodings() {
        let body = r#"{"routes":[
            {"duration":"300s","polyline":{"encodedPolyline":"abc"}},
            {"duration":120000000000},
            {"duration":"7m30s","travelAdvisory":{}}
        ]}"#;

        let response = RouteResponse::decode(body).expect("should decode");

        assert_eq!(response.routes, routes(&[300, 120, 450]));
        assert_eq!(response.shortest(), Some(TravelDuration::from_secs(120)));
    }

    #[rstest]
    #[case("{}")]
    #[case(r#"{"routes":[]}"#)]
    #[case(r#"{"routes":null}"#)]
    #[case("null")]
    fn empty_route_list_reports_raw_body(#[case] body: &str) {
        let err = RouteResponse::decode(body).expect_err("should fail");

        match err {
            RoutingError::NoRoutes { body: reported } => assert_eq!(reported, body),
            other => panic!("expected NoRoutes, got {other:?}"),
        }
    }

    #[rstest]
    fn invalid_duration_shape_fails_decoding() {
        let err = RouteResponse::decode(r#"{"routes":[{"duration":false}]}"#)
            .expect_err("should fail");

        assert!(matches!(err, RoutingError::Decode(_)));
        assert!(err.to_string().contains("invalid duration"), "{err}");
    }

    #[rstest]
    fn missing_duration_defaults_to_zero() {
        let response = RouteResponse::decode(r#"{"routes":[{}]}"#).expect("should decode");

        assert_eq!(response.shortest(), Some(TravelDuration::ZERO));
    }
}
