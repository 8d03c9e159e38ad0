//! Core error types for focusflow-core.
//!
//! This module defines the error hierarchy using thiserror. API failures
//! carry enough information for a front end to decide between forcing a
//! re-login and showing a transient notice.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Remote API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage errors (token, widget layout)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

impl CoreError {
    /// True when the failure was a 401 and the stored session is gone.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CoreError::Api(ApiError::Unauthorized))
    }
}

/// Errors produced by the API gateway.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401: the token was rejected and has been cleared
    #[error("Session expired or invalid credentials")]
    Unauthorized,

    /// 403
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx response
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// No response was received
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The base URL or a path could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Server { status, .. } | ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Local key/value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// Failed to read or write the local store file
    #[error("Local store at {path}: {message}")]
    File { path: PathBuf, message: String },

    /// OS keyring failure
    #[error("Keyring error: {0}")]
    Keyring(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end_time ({end}) must be greater than start_time ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<keyring::Error> for StorageError {
    fn from(err: keyring::Error) -> Self {
        StorageError::Keyring(err.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_detected_through_core_error() {
        let err: CoreError = ApiError::Unauthorized.into();
        assert!(err.is_unauthorized());

        let other: CoreError = ApiError::Network("down".into()).into();
        assert!(!other.is_unauthorized());
    }

    #[test]
    fn api_error_reports_status() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(ApiError::Forbidden("no".into()).status(), Some(403));
        assert_eq!(
            ApiError::Server { status: 502, message: String::new() }.status(),
            Some(502)
        );
        assert_eq!(ApiError::Network("timeout".into()).status(), None);
    }
}
