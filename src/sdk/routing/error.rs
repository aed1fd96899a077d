use serde::Deserialize;
use std::num::ParseFloatError;
use thiserror::Error;

// Helper structs to parse the JSON error envelope returned by the Routes API
#[derive(Deserialize, Debug)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct ApiErrorPayload {
    pub error: ApiErrorDetail,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("input {input:?} does not have two comma separated parts (found {parts})")]
    CoordinateArity { input: String, parts: usize },

    #[error("input {input:?} has a non-numeric part {part:?}: {source}")]
    CoordinateNumber {
        input: String,
        part: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Failed to encode route request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode route response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    // This variant holds the structured error from the API
    #[error("API Error (Code {code}, {status}): {message}")]
    ApiError {
        code: u16,
        status: String,
        message: String,
    },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error (HTTP {status}): {body}")]
    RawApiError { status: u16, body: String },

    #[error("No routes in response: {body}")]
    NoRoutes { body: String },
}
