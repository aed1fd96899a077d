use super::coord::{Coordinate, Waypoint};
use super::error::RoutingError;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Travel modes understood by the Routes API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Drive,
    Bicycle,
    Walk,
    TwoWheeler,
    Transit,
}

impl TravelMode {
    /// Traffic-aware preferences and traffic computations only apply to driving.
    pub fn uses_traffic(self) -> bool {
        self == TravelMode::Drive
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TravelMode::Drive => "DRIVE",
            TravelMode::Bicycle => "BICYCLE",
            TravelMode::Walk => "WALK",
            TravelMode::TwoWheeler => "TWO_WHEELER",
            TravelMode::Transit => "TRANSIT",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingPreference {
    TrafficUnaware,
    TrafficAware,
    TrafficAwareOptimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraComputation {
    Tolls,
    FuelConsumption,
    TrafficOnPolyline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteModifiers {
    pub avoid_tolls: bool,
    pub avoid_highways: bool,
    pub avoid_ferries: bool,
}

/// The body POSTed to `computeRoutes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub departure_time: String,
    pub travel_mode: TravelMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_preference: Option<RoutingPreference>,
    pub extra_computations: Vec<ExtraComputation>,
    pub compute_alternative_routes: bool,
    pub route_modifiers: RouteModifiers,
    pub language_code: String,
    pub units: String,
}

impl RouteRequest {
    pub fn to_json(&self) -> Result<Vec<u8>, RoutingError> {
        serde_json::to_vec(self).map_err(RoutingError::Encode)
    }
}

/// Static settings shared by every request of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDefaults {
    pub language_code: String,
    pub units: String,
    pub route_modifiers: RouteModifiers,
    pub compute_alternative_routes: bool,
    pub routing_preference: Option<RoutingPreference>,
    pub extra_computations: Vec<ExtraComputation>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            units: "METRIC".to_string(),
            route_modifiers: RouteModifiers::default(),
            compute_alternative_routes: true,
            routing_preference: Some(RoutingPreference::TrafficAware),
            extra_computations: vec![ExtraComputation::TrafficOnPolyline],
        }
    }
}

impl RequestDefaults {
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_route_modifiers(mut self, route_modifiers: RouteModifiers) -> Self {
        self.route_modifiers = route_modifiers;
        self
    }

    pub fn with_alternatives(mut self, compute_alternative_routes: bool) -> Self {
        self.compute_alternative_routes = compute_alternative_routes;
        self
    }

    /// Builds the request for one departure slot.
    pub fn build(
        &self,
        departure: DateTime<Utc>,
        mode: TravelMode,
        origin: Coordinate,
        destination: Coordinate,
    ) -> RouteRequest {
        let (routing_preference, extra_computations) = if mode.uses_traffic() {
            (self.routing_preference, self.extra_computations.clone())
        } else {
            (None, Vec::new())
        };

        RouteRequest {
            origin: origin.into(),
            destination: destination.into(),
            departure_time: format_departure(departure),
            travel_mode: mode,
            routing_preference,
            extra_computations,
            compute_alternative_routes: self.compute_alternative_routes,
            route_modifiers: self.route_modifiers,
            language_code: self.language_code.clone(),
            units: self.units.clone(),
        }
    }
}

/// RFC3339 in UTC, second precision: `2024-05-01T08:00:00Z`.
pub fn format_departure(departure: DateTime<Utc>) -> String {
    departure.to_rfc3339_opts(SecondsFormat::Secs, true)
}
