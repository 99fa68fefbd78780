//! Shared setup for commands that talk to the backend.

use std::path::{Path, PathBuf};

use docsign::config::config_file_path;
use docsign::{Api, ClientConfig, HttpClient};

use crate::error::CliError;

/// Resolved configuration plus the clients built from it.
pub struct CliRunner {
    config: ClientConfig,
    http: HttpClient,
    api: Api,
}

impl CliRunner {
    /// Load configuration from `path` (or the default location) and the
    /// environment, then build the HTTP client.
    pub fn new(path: Option<&Path>) -> Result<Self, CliError> {
        let path: PathBuf = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);
        let config = ClientConfig::load_from(&path)?;
        let http = HttpClient::from_config(config.clone())?;
        let api = Api::new(http.clone());
        Ok(Self { config, http, api })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Log the command being run and the backend it targets.
    pub fn log_startup(&self, command: &str) {
        tracing::info!(
            command,
            base_url = %self.config.api_base_url,
            timeout_secs = self.config.request_timeout.as_secs(),
            "docsign starting"
        );
    }
}
