use crate::sdk::config::{ConfigError, RoutesConfig};
use crate::sdk::routing::error::{ApiErrorPayload, RoutingError};
use crate::sdk::routing::request::RouteRequest;
use crate::sdk::routing::response::RouteResponse;
use crate::sdk::routing::service::RoutingProvider;
use reqwest::blocking::{Client, Request};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";
pub const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

pub struct RemoteRoutesProvider {
    client: Client,
    config: RoutesConfig,
}

impl RemoteRoutesProvider {
    pub fn new(config: RoutesConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConfigError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Builds the POST for `request` without sending it.
    pub fn build_request(&self, request: &RouteRequest) -> Result<Request, RoutingError> {
        let body = request.to_json()?;
        let built = self
            .client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(FIELD_MASK_HEADER, &self.config.field_mask)
            .body(body)
            .build()?;
        Ok(built)
    }
}

impl RoutingProvider for RemoteRoutesProvider {
    fn compute_routes(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        log::debug!(
            "[PROVIDER] Calling computeRoutes for {} departing {}",
            request.travel_mode,
            request.departure_time
        );
        let http_request = self.build_request(request)?;

        let response = match self.client.execute(http_request) {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send POST request. URL: {}\nError: {}",
                    self.config.endpoint,
                    e
                );
                return Err(RoutingError::Request(e));
            }
        };

        let status = response.status();
        let text = response.text()?;
        interpret(status, text)
    }
}

/// Maps a status and body to routes or the matching API error.
fn interpret(status: StatusCode, text: String) -> Result<RouteResponse, RoutingError> {
    if status.is_success() {
        return RouteResponse::decode(&text);
    }

    // Try to parse the structured error first
    if let Ok(payload) = serde_json::from_str::<ApiErrorPayload>(&text) {
        return Err(RoutingError::ApiError {
            code: payload.error.code,
            status: payload.error.status,
            message: payload.error.message,
        });
    }
    log::error!(
        "API returned non-success status: {}. Unparseable Body: {}",
        status,
        text
    );
    Err(RoutingError::RawApiError {
        status: status.as_u16(),
        body: text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::routing::coord::Coordinate;
    use crate::sdk::routing::duration::TravelDuration;
    use crate::sdk::routing::request::{RequestDefaults, TravelMode};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> RemoteRoutesProvider {
        RemoteRoutesProvider::new(RoutesConfig::new("secret-key")).expect("provider should build")
    }

    #[fixture]
    fn route_request() -> RouteRequest {
        RequestDefaults::default().build(
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            TravelMode::Drive,
            Coordinate::new(51.5, -0.1),
            Coordinate::new(51.6, -0.2),
        )
    }

    #[rstest]
    fn request_targets_compute_routes(provider: RemoteRoutesProvider, route_request: RouteRequest) {
        let built = provider.build_request(&route_request).expect("should build");

        assert_eq!(built.method(), reqwest::Method::POST);
        assert_eq!(
            built.url().as_str(),
            "https://routes.googleapis.com/directions/v2:computeRoutes"
        );
    }

    #[rstest]
    fn request_carries_required_headers(
        provider: RemoteRoutesProvider,
        route_request: RouteRequest,
    ) {
        let built = provider.build_request(&route_request).expect("should build");
        let headers = built.headers();

        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[API_KEY_HEADER], "secret-key");
        assert_eq!(
            headers[FIELD_MASK_HEADER],
            "routes.duration,routes.travelAdvisory,routes.polyline.encodedPolyline"
        );
    }

    #[rstest]
    fn request_body_is_serialised_route_request(
        provider: RemoteRoutesProvider,
        route_request: RouteRequest,
    ) {
        let built = provider.build_request(&route_request).expect("should build");
        let bytes = built
            .body()
            .and_then(|body| body.as_bytes())
            .expect("body should be buffered");

        let decoded: RouteRequest = serde_json::from_slice(bytes).expect("should decode");
        assert_eq!(decoded, route_request);
    }

    #[rstest]
    fn invalid_endpoint_fails_request_construction(route_request: RouteRequest) {
        let provider =
            RemoteRoutesProvider::new(RoutesConfig::new("key").with_endpoint("not a url"))
                .expect("provider should build");

        let err = provider
            .build_request(&route_request)
            .expect_err("should fail");

        assert!(matches!(err, RoutingError::Request(_)));
    }

    #[rstest]
    fn error_envelope_becomes_api_error() {
        let body = r#"{"error":{"code":403,"message":"The provided API key is invalid.","status":"PERMISSION_DENIED"}}"#;

        let err = interpret(StatusCode::FORBIDDEN, body.to_string()).expect_err("should fail");

        match err {
            RoutingError::ApiError {
                code,
                status,
                message,
            } => {
                assert_eq!(code, 403);
                assert_eq!(status, "PERMISSION_DENIED");
                assert_eq!(message, "The provided API key is invalid.");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[rstest]
    fn unparseable_error_body_is_kept_verbatim() {
        let err = interpret(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded".to_string())
            .expect_err("should fail");

        match err {
            RoutingError::RawApiError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected RawApiError, got {other:?}"),
        }
    }

    #[rstest]
    fn success_body_is_decoded() {
        let body = r#"{"routes":[{"duration":"300s"},{"duration":"120s"}]}"#;

        let response = interpret(StatusCode::OK, body.to_string()).expect("should decode");

        assert_eq!(response.shortest(), Some(TravelDuration::from_secs(120)));
    }

    #[rstest]
    fn success_without_routes_reports_body() {
        let err = interpret(StatusCode::OK, "{}".to_string()).expect_err("should fail");

        assert!(
            matches!(&err, RoutingError::NoRoutes { body } if body == "{}"),
            "{err:?}"
        );
    }
}
