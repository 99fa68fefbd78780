//! User commands.

use clap::Subcommand;
use docsign::model::{NewUser, UserPosition, UserRole};
use docsign::Api;

use super::common::{parse_arg, print_json};
use crate::error::CliError;

/// User subcommands.
#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user
    Create {
        /// Email address
        email: String,

        /// Display name
        name: String,

        /// Role (guest, club_member, organizer, manager, admin)
        #[arg(long, default_value = "guest")]
        role: String,

        /// Position (president, member)
        #[arg(long, default_value = "member")]
        position: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Look a user up by email
    Get {
        /// Email address
        email: String,
    },

    /// Show user totals per role
    Count,
}

/// Run a user subcommand.
pub async fn run(command: UserCommands, api: &Api) -> Result<(), CliError> {
    match command {
        UserCommands::Create {
            email,
            name,
            role,
            position,
            phone,
        } => {
            let user = NewUser {
                email,
                name,
                phone_number: phone,
                role: parse_arg::<UserRole>("role", &role)?,
                position: parse_arg::<UserPosition>("position", &position)?,
            };
            print_json(&api.users.create_user(&user).await?)
        }
        UserCommands::Get { email } => print_json(&api.users.get_user(&email).await?),
        UserCommands::Count => {
            let count = api.users.count_users().await?;
            println!("Users: {}", count.total);
            println!("  admin:       {}", count.role.admin);
            println!("  manager:     {}", count.role.manager);
            println!("  organizer:   {}", count.role.organizer);
            println!("  club_member: {}", count.role.club_member);
            println!("  guest:       {}", count.role.guest);
            Ok(())
        }
    }
}
