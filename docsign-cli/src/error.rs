//! CLI error type.

use docsign::{ApiError, ConfigError};
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    ConfigLoad(#[from] ConfigError),

    #[error("Backend request failed: {0}")]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to format output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Failed to start async runtime: {0}")]
    Runtime(String),

    #[error("{failed} of {attempted} uploads failed")]
    UploadsFailed { failed: usize, attempted: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = CliError::from(ApiError::Status {
            status: 404,
            body: String::new(),
        });
        assert_eq!(err.to_string(), "Backend request failed: HTTP 404");
    }

    #[test]
    fn test_upload_failure_message() {
        let err = CliError::UploadsFailed {
            failed: 1,
            attempted: 3,
        };
        assert_eq!(err.to_string(), "1 of 3 uploads failed");
    }
}
