use std::time::Duration;
use thiserror::Error;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";
pub const DEFAULT_FIELD_MASK: &str =
    "routes.duration,routes.travelAdvisory,routes.polyline.encodedPolyline";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing API key (set --api_key or GOOGLE_MAPS_API_KEY)")]
    MissingApiKey,

    #[error("sweep step must be at least one minute")]
    ZeroStep,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Checks the key clap read from `--api_key` or [`API_KEY_ENV`].
pub fn resolve_api_key(flag: Option<String>) -> Result<String, ConfigError> {
    flag.filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)
}

/// Where and how to reach the Routes API.
#[derive(Debug, Clone)]
pub struct RoutesConfig {
    pub endpoint: String,
    pub api_key: String,
    pub field_mask: String,
    /// `None` keeps the HTTP client's default timeout.
    pub timeout: Option<Duration>,
}

impl RoutesConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            field_mask: DEFAULT_FIELD_MASK.to_string(),
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
