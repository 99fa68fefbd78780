//! docsign CLI - Command-line interface
//!
//! This binary provides a command-line interface to the docsign library:
//! session inspection, project and user management, stored file operations
//! and batch document uploads with live progress.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::auth::AuthCommands;
use commands::config::ConfigCommands;
use commands::files::FileCommands;
use commands::projects::ProjectCommands;
use commands::upload::UploadArgs;
use commands::users::UserCommands;
use error::CliError;
use runner::CliRunner;

#[derive(Debug, Parser)]
#[command(name = "docsign", version, about = "Client for the docsign e-signature backend")]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Path to config.ini (defaults to the user config directory)
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Session commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Project commands
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// User commands
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Stored project file commands
    Files {
        #[command(subcommand)]
        command: FileCommands,
    },

    /// Upload local files into a project
    Upload {
        /// Target project id
        project_id: i64,

        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Description stored with every uploaded file
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "docsign=debug,docsign_cli=debug"
    } else {
        "docsign=info,docsign_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config_file.as_deref();

    let command = match cli.command {
        Commands::Config { command } => return commands::config::run(command, config_path),
        other => other,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    runtime.block_on(async {
        let runner = CliRunner::new(config_path)?;
        let api = runner.api();

        match command {
            Commands::Auth { command } => {
                runner.log_startup("auth");
                commands::auth::run(command, api).await
            }
            Commands::Projects { command } => {
                runner.log_startup("projects");
                commands::projects::run(command, api).await
            }
            Commands::Users { command } => {
                runner.log_startup("users");
                commands::users::run(command, api).await
            }
            Commands::Files { command } => {
                runner.log_startup("files");
                commands::files::run(command, api).await
            }
            Commands::Upload {
                project_id,
                files,
                description,
            } => {
                runner.log_startup("upload");
                let args = UploadArgs {
                    project_id,
                    files,
                    description,
                };
                commands::upload::run(args, &runner).await
            }
            Commands::Config { .. } => unreachable!("config commands return before the runtime starts"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "docsign",
            "upload",
            "42",
            "a.pdf",
            "b.pdf",
            "--description",
            "contracts",
        ])
        .unwrap();

        match cli.command {
            Commands::Upload {
                project_id,
                files,
                description,
            } => {
                assert_eq!(project_id, 42);
                assert_eq!(files.len(), 2);
                assert_eq!(description, "contracts");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_path_runs_without_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ini");
        let cli = Cli::try_parse_from([
            "docsign",
            "--config",
            path.to_str().unwrap(),
            "config",
            "path",
        ])
        .unwrap();

        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_upload_requires_files() {
        assert!(Cli::try_parse_from(["docsign", "upload", "42"]).is_err());
    }

    #[test]
    fn test_parse_qr_defaults() {
        let cli = Cli::try_parse_from(["docsign", "--verbose", "projects", "qr", "7"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Projects {
                command: ProjectCommands::Qr { id, scale, out, .. },
            } => {
                assert_eq!(id, 7);
                assert_eq!(scale, 4);
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
