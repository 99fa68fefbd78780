//! Session commands.

use clap::Subcommand;
use docsign::Api;

use super::common::print_json;
use crate::error::CliError;

/// Auth subcommands.
#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Print the URL that starts the Google sign-in flow
    LoginUrl,

    /// Show the user owning the current session
    Me,

    /// End the current session
    Logout,
}

/// Run an auth subcommand.
pub async fn run(command: AuthCommands, api: &Api) -> Result<(), CliError> {
    match command {
        AuthCommands::LoginUrl => {
            println!("{}", api.auth.login_url());
            Ok(())
        }
        AuthCommands::Me => print_json(&api.auth.me().await?),
        AuthCommands::Logout => {
            api.auth.logout().await?;
            println!("Logged out");
            Ok(())
        }
    }
}
