use super::error::RoutingError;
use super::request::RouteRequest;
use super::response::RouteResponse;

pub trait RoutingProvider {
    /// Computes routes for one request. A successful response should hold at
    /// least one route; implementations decode through
    /// [`RouteResponse::decode`](super::response::RouteResponse::decode),
    /// which turns an empty list into `RoutingError::NoRoutes` carrying the
    /// raw body.
    fn compute_routes(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError>;
}
