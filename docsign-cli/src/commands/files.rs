//! Stored project file commands.

use std::path::PathBuf;

use clap::Subcommand;
use docsign::Api;

use super::common::{confirm, print_json, write_output};
use crate::error::CliError;

/// File subcommands.
#[derive(Debug, Subcommand)]
pub enum FileCommands {
    /// Assign a signer to a stored file
    Signer {
        /// Project file id
        file_id: i64,

        /// Signing user id
        user_id: i64,

        /// 1-based signing position
        #[arg(long, default_value_t = 1)]
        position: u32,
    },

    /// Record a signature on a stored file
    Signature {
        /// Project file id
        file_id: i64,

        /// Signing user id
        user_id: i64,
    },

    /// Download a stored file
    Download {
        /// Project file id
        file_id: i64,

        /// Destination path
        #[arg(long)]
        out: PathBuf,
    },

    /// Permanently delete a stored file
    Delete {
        /// Project file id
        file_id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Run a file subcommand.
pub async fn run(command: FileCommands, api: &Api) -> Result<(), CliError> {
    let files = &api.files;
    match command {
        FileCommands::Signer {
            file_id,
            user_id,
            position,
        } => print_json(&files.create_file_signer(file_id, user_id, position).await?),
        FileCommands::Signature { file_id, user_id } => {
            files.create_file_signature(file_id, user_id).await?;
            println!("Signature recorded for file {}", file_id);
            Ok(())
        }
        FileCommands::Download { file_id, out } => {
            let bytes = files.download_project_file(file_id).await?;
            write_output(&out, &bytes)
        }
        FileCommands::Delete { file_id, yes } => {
            let prompt = format!("Permanently delete file {}?", file_id);
            if !confirm(&prompt, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            files.delete_project_file(file_id).await?;
            println!("Deleted file {}", file_id);
            Ok(())
        }
    }
}
