pub mod sdk;

pub use sdk::config::{resolve_api_key, RoutesConfig};
pub use sdk::routing::{
    Coordinate, RemoteRoutesProvider, RequestDefaults, RoutingError, RoutingProvider,
    TravelDuration, TravelMode,
};
pub use sdk::sweep::{ErrorPolicy, Sweep, SweepError, SweepWindow};
