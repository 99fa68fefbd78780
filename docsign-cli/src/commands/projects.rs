//! Project commands.

use std::path::PathBuf;

use clap::Subcommand;
use docsign::model::{ProjectStatus, QrCode};
use docsign::Api;

use super::common::{parse_arg, print_json, write_output, QrFormatArg};
use crate::error::CliError;

/// Project subcommands.
#[derive(Debug, Subcommand)]
pub enum ProjectCommands {
    /// List projects owned by the signed-in user
    List,

    /// Show a project with its files and signers
    Get {
        /// Project id
        id: i64,
    },

    /// Look a project up by its share code
    ByCode {
        /// Project share code
        code: String,
    },

    /// Fetch a project's QR code
    Qr {
        /// Project id
        id: i64,

        /// Output format
        #[arg(long, value_enum, default_value = "png")]
        format: QrFormatArg,

        /// Scale factor for the rendered code
        #[arg(long, default_value_t = 4)]
        scale: u32,

        /// Write the PNG to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Create an uploaded-document project
    Create {
        /// Project name
        name: String,

        /// Optional project number
        #[arg(long)]
        number: Option<String>,

        /// Create the project as active instead of draft
        #[arg(long)]
        active: bool,
    },

    /// Change a project's status (draft, active, archived)
    SetStatus {
        /// Project id
        id: i64,

        /// New status
        status: String,
    },
}

/// Run a project subcommand.
pub async fn run(command: ProjectCommands, api: &Api) -> Result<(), CliError> {
    let projects = &api.projects;
    match command {
        ProjectCommands::List => {
            let list = projects.list_own().await?;
            tracing::debug!(count = list.len(), "fetched owned projects");
            print_json(&list)
        }
        ProjectCommands::Get { id } => print_json(&projects.get(id).await?),
        ProjectCommands::ByCode { code } => print_json(&projects.get_by_code(&code).await?),
        ProjectCommands::Qr {
            id,
            format,
            scale,
            out,
        } => match projects.qr(id, format.into(), scale).await? {
            QrCode::Png(bytes) => match out {
                Some(path) => write_output(&path, &bytes),
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(&bytes)?;
                    Ok(())
                }
            },
            QrCode::DataUrl(url) => match out {
                Some(path) => write_output(&path, url.as_bytes()),
                None => {
                    println!("{}", url);
                    Ok(())
                }
            },
        },
        ProjectCommands::Create {
            name,
            number,
            active,
        } => {
            let project = if active {
                projects.create_active(&name, number.as_deref()).await?
            } else {
                projects.create_draft(&name, number.as_deref()).await?
            };
            print_json(&project)
        }
        ProjectCommands::SetStatus { id, status } => {
            let status: ProjectStatus = parse_arg("status", &status)?;
            print_json(&projects.update_status(id, status).await?)
        }
    }
}
