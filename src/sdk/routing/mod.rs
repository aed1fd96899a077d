pub mod coord;
pub mod duration;
pub mod error;
pub mod provider;
pub mod request;
pub mod response;
pub mod service;

#[doc(hidden)]
pub mod test_support;

pub use coord::Coordinate;
pub use duration::{DurationError, TravelDuration};
pub use error::RoutingError;
pub use provider::RemoteRoutesProvider;
pub use request::{RequestDefaults, RouteModifiers, RouteRequest, TravelMode};
pub use response::{Route, RouteResponse};
pub use service::RoutingProvider;
