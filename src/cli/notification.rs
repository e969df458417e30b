//! Notification CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_notification_list;
use crate::error::{PesoError, PesoResult};
use crate::models::{AppNotification, NotificationKind};
use crate::services::NotificationService;
use crate::storage::Storage;

use super::today;

/// Notification subcommands
#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List notifications, newest first
    List {
        /// Only unread notifications
        #[arg(short, long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark every notification as read
    ReadAll,
    /// Delete a notification
    Delete {
        /// Notification ID
        id: String,
    },
    /// Delete every notification
    Clear,
    /// Check for bills due soon and add reminders
    Refresh,
    /// Add a note for yourself
    Push {
        title: String,
        #[arg(default_value = "")]
        message: String,
        /// info, warning, success or alert
        #[arg(short = 't', long = "type", default_value = "info")]
        kind: String,
    },
}

fn parse_kind(input: &str) -> PesoResult<NotificationKind> {
    match input.trim().to_lowercase().as_str() {
        "info" => Ok(NotificationKind::Info),
        "warning" => Ok(NotificationKind::Warning),
        "success" => Ok(NotificationKind::Success),
        "alert" => Ok(NotificationKind::Alert),
        _ => Err(PesoError::Validation(format!(
            "Invalid notification type: '{}'. Use info, warning, success or alert",
            input
        ))),
    }
}

fn require(service: &NotificationService, id: &str) -> PesoResult<AppNotification> {
    service
        .find(id)?
        .ok_or_else(|| PesoError::notification_not_found(id))
}

/// Handle a notification command
pub fn handle_notification_command(
    storage: &Storage,
    settings: &Settings,
    cmd: NotificationCommands,
) -> PesoResult<()> {
    let service = NotificationService::new(storage).with_reminder_days(settings.bill_reminder_days);

    match cmd {
        NotificationCommands::List { unread } => {
            let notifications = service.list(unread)?;
            println!("{}", format_notification_list(&notifications));
            println!("\n{} unread", service.unread_count()?);
        }

        NotificationCommands::Read { id } => {
            let found = require(&service, &id)?;
            let read = service.mark_read(found.id)?;
            println!("Marked as read: {}", read.title);
        }

        NotificationCommands::ReadAll => {
            let count = service.mark_all_read()?;
            println!("Marked {} notification(s) as read", count);
        }

        NotificationCommands::Delete { id } => {
            let found = require(&service, &id)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted notification: {}", deleted.title);
        }

        NotificationCommands::Clear => {
            let count = service.clear()?;
            println!("Cleared {} notification(s)", count);
        }

        NotificationCommands::Refresh => {
            let pushed = service.refresh_bill_reminders(today())?;
            if pushed.is_empty() {
                println!("No new bill reminders.");
            }
            for n in pushed {
                println!("{}: {}", n.title, n.message);
            }
        }

        NotificationCommands::Push {
            title,
            message,
            kind,
        } => {
            let pushed = service.push(parse_kind(&kind)?, &title, &message)?;
            println!("Added notification: {}", pushed.id);
        }
    }

    Ok(())
}
