use thiserror::Error;

/// Custom error types for the geo-clock application
#[derive(Error, Debug)]
pub enum AppError {
    /// Error when API request fails
    #[error("API request failed: {0}")]
    ApiRequestFailed(String),

    /// Error when the API answered but reported a non-OK status
    #[error("API returned status {status}: {message}")]
    ApiStatus { status: String, message: String },

    /// Error when a field needed from an API response is absent
    #[error("Missing field in API response: {0}")]
    MissingField(&'static str),

    /// Error when a zone identifier is not in the tz database
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// Error when there are no coordinates to look up
    #[error("No coordinates available")]
    NoCoordinates,

    /// Error when environment variable is not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Error when a configuration value cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Wrapper for reqwest errors
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Wrapper for JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
