//! Profile CLI commands

use clap::Subcommand;

use crate::error::PesoResult;
use crate::services::profile::{ProfileService, ProfileUpdate};
use crate::storage::Storage;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile
    Show,
    /// Edit the profile (pass an empty avatar URL to clear it)
    Edit {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        avatar_url: Option<String>,
        /// Three-letter currency code, e.g. PHP
        #[arg(short, long)]
        currency: Option<String>,
    },
}

/// Handle a profile command
pub fn handle_profile_command(storage: &Storage, cmd: ProfileCommands) -> PesoResult<()> {
    let service = ProfileService::new(storage);

    match cmd {
        ProfileCommands::Show => {
            let profile = service.get()?;
            println!("[{}] {}", profile.initials(), profile.name);
            if !profile.email.is_empty() {
                println!("  Email:    {}", profile.email);
            }
            if let Some(url) = &profile.avatar_url {
                println!("  Avatar:   {}", url);
            }
            println!("  Currency: {}", profile.currency);
        }

        ProfileCommands::Edit {
            name,
            email,
            avatar_url,
            currency,
        } => {
            if name.is_none() && email.is_none() && avatar_url.is_none() && currency.is_none() {
                println!("No changes specified. Use --name, --email, --avatar-url or --currency.");
                return Ok(());
            }
            let profile = service.update(ProfileUpdate {
                name,
                email,
                avatar_url,
                currency,
            })?;
            println!("Updated profile: {}", profile.name);
        }
    }

    Ok(())
}
