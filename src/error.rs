//! Error types for API requests and startup configuration.

use thiserror::Error;

/// Recoverable failures of a single API request.
///
/// None of these are fatal: the orchestrator reports them to the renderer
/// and leaves existing overlays as they were.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("malformed response: {0}")]
    ParseError(String),
    #[error("response contained no usable result")]
    EmptyResult,
    #[error("API returned status {code}: {message}")]
    Status { code: u16, message: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::ParseError(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ParseError(err.to_string())
    }
}

/// Startup configuration failures. These abort the host.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Read(#[from] ::config::ConfigError),
    #[error("required setting `{0}` is missing or empty")]
    MissingKey(&'static str),
}
