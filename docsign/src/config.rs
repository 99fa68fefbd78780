//! Client configuration.
//!
//! `ClientConfig` holds everything needed to construct the HTTP client
//! adapter: the backend base URL, request timeouts and an optional session
//! cookie to forward. Settings are layered from defaults, an INI file and
//! the process environment (later sources win).
//!
//! ```ini
//! [api]
//! base_url = https://api.example.com
//! timeout = 10
//! upload_timeout = 300
//! session_cookie = sid=abc123
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use reqwest::Url;

use crate::error::ConfigError;

/// Default timeout for regular API requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default timeout for multipart uploads in seconds (5 minutes).
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 300;

/// Environment variable holding the backend base URL.
pub const ENV_BASE_URL: &str = "PUBLIC_API_BASE_URL";
/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT: &str = "DOCSIGN_TIMEOUT_SECS";
/// Environment variable overriding the upload timeout.
pub const ENV_UPLOAD_TIMEOUT: &str = "DOCSIGN_UPLOAD_TIMEOUT_SECS";
/// Environment variable holding a session cookie to forward.
pub const ENV_SESSION_COOKIE: &str = "DOCSIGN_SESSION_COOKIE";

const SECTION: &str = "api";

/// Validated configuration for the backend client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_base_url: Url,

    /// Timeout applied to every regular request.
    pub request_timeout: Duration,

    /// Timeout applied to multipart uploads.
    pub upload_timeout: Duration,

    /// Cookie header forwarded with every request, if any.
    pub session_cookie: Option<String>,
}

impl ClientConfig {
    /// Create a config for the given base URL with default timeouts.
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
            session_cookie: None,
        })
    }

    /// Set the regular request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the upload timeout.
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Set the cookie header forwarded with every request.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Load configuration from the default config file and the process environment.
    ///
    /// A missing config file is not an error; a missing base URL is.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from an explicit config file and the process environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let file = if path.exists() {
            Some(
                Ini::load_from_file(path).map_err(|e| ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?,
            )
        } else {
            None
        };

        Self::from_sources(file.as_ref(), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from an optional INI document and an environment lookup.
    pub fn from_sources<F>(file: Option<&Ini>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_file = |key: &str| {
            file.and_then(|ini| ini.section(Some(SECTION)))
                .and_then(|props| props.get(key))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let from_env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let base_url = from_env(ENV_BASE_URL)
            .or_else(|| from_file("base_url"))
            .ok_or(ConfigError::MissingBaseUrl)?;

        let mut config = Self::new(&base_url)?;

        if let Some(value) = from_env(ENV_TIMEOUT).or_else(|| from_file("timeout")) {
            config.request_timeout = parse_timeout("timeout", &value)?;
        }
        if let Some(value) = from_env(ENV_UPLOAD_TIMEOUT).or_else(|| from_file("upload_timeout")) {
            config.upload_timeout = parse_timeout("upload_timeout", &value)?;
        }
        config.session_cookie = from_env(ENV_SESSION_COOKIE).or_else(|| from_file("session_cookie"));

        Ok(config)
    }

    /// Join an API path onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Path of the default config file (`<config dir>/docsign/config.ini`).
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docsign")
        .join("config.ini")
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

fn parse_timeout(key: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
