//! Error types for backend requests and client configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for backend API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, reset).
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response from {path}: {reason}")]
    Decode { path: String, reason: String },

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// The HTTP status code, when the backend produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error came from the network layer rather than the backend.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Errors raised while resolving client configuration.
///
/// These are fatal: a client without a valid base URL cannot be started.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No base URL in the config file or environment.
    #[error("PUBLIC_API_BASE_URL is not set")]
    MissingBaseUrl,

    /// The base URL did not parse as an absolute http(s) URL.
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    /// A timeout setting was not a positive number of seconds.
    #[error("invalid {key} '{value}': expected a positive number of seconds")]
    InvalidTimeout { key: String, value: String },

    /// The config file exists but could not be read or parsed.
    #[error("failed to read config file {}: {reason}", path.display())]
    ReadFailed { path: PathBuf, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}
