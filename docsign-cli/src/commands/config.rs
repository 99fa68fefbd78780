//! Configuration CLI commands.
//!
//! Provides `config path` and `config show` for inspecting how the backend
//! connection is resolved from the config file and environment.

use std::path::Path;

use clap::Subcommand;
use docsign::config::{config_file_path, ClientConfig};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the resolved configuration
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, path: Option<&Path>) -> Result<(), CliError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);
    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = ClientConfig::load_from(&path)?;
            for line in describe(&config) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// Human-readable lines for a resolved configuration; the cookie value is hidden.
fn describe(config: &ClientConfig) -> Vec<String> {
    vec![
        "[api]".to_string(),
        format!("  base_url = {}", config.api_base_url),
        format!("  timeout = {}", config.request_timeout.as_secs()),
        format!("  upload_timeout = {}", config.upload_timeout.as_secs()),
        format!(
            "  session_cookie = {}",
            if config.session_cookie.is_some() {
                "(set)"
            } else {
                "(not set)"
            }
        ),
    ]
}
