//! Savings goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_goal_list;
use crate::error::{PesoError, PesoResult};
use crate::models::{AppNotification, GoalCategory, Money};
use crate::services::goal::{GoalUpdate, NewGoal};
use crate::services::{GoalService, WalletService};
use crate::storage::Storage;

use super::{
    parse_amount, parse_date_or_today, parse_day, parse_optional_amount, parse_optional_day,
    print_record_outcome, today,
};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Create {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        saved: String,
        /// tech, travel, emergency, shopping, vehicle, home, education or other
        #[arg(short, long, default_value = "other")]
        category: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List savings goals
    List,
    /// Edit a goal
    Edit {
        /// Goal name or ID
        goal: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<String>,
        /// Override the saved amount
        #[arg(short, long)]
        saved: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a goal
    Delete {
        /// Goal name or ID
        goal: String,
    },
    /// Move money from a wallet into a goal
    Deposit {
        /// Goal name or ID
        goal: String,
        /// Amount to deposit
        amount: String,
        /// Wallet name or ID
        #[arg(short, long)]
        wallet: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

fn parse_goal_category(input: &str) -> PesoResult<GoalCategory> {
    GoalCategory::parse(input).ok_or_else(|| {
        let valid: Vec<&str> = GoalCategory::ALL.iter().map(|c| c.as_str()).collect();
        PesoError::Validation(format!(
            "Invalid goal category: '{}'. Valid categories: {}",
            input,
            valid.join(", ")
        ))
    })
}

fn celebrate(celebration: Option<&AppNotification>) {
    if let Some(n) = celebration {
        println!();
        println!("{} {}", n.title, n.message);
    }
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> PesoResult<()> {
    let service = GoalService::new(storage).with_warning_percent(settings.budget_warning_percent);

    match cmd {
        GoalCommands::Create {
            name,
            target,
            deadline,
            saved,
            category,
            color,
            icon,
        } => {
            let saved = service.create(NewGoal {
                name,
                target_amount: parse_amount(&target)?,
                current_amount: parse_optional_amount(Some(saved))?.unwrap_or(Money::zero()),
                deadline: parse_day(&deadline)?,
                category: parse_goal_category(&category)?,
                color,
                icon,
            })?;
            println!(
                "Created goal: {} ({} by {})",
                saved.goal.name, saved.goal.target_amount, saved.goal.deadline
            );
            println!("  ID: {}", saved.goal.id);
            celebrate(saved.celebration.as_ref());
        }

        GoalCommands::List => {
            println!("{}", format_goal_list(&service.list()?, today()));
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            saved,
            deadline,
            category,
            color,
            icon,
        } => {
            let found = service.resolve(&goal)?;
            let update = GoalUpdate {
                name,
                target_amount: parse_optional_amount(target)?,
                current_amount: parse_optional_amount(saved)?,
                deadline: parse_optional_day(deadline)?,
                category: category.as_deref().map(parse_goal_category).transpose()?,
                color,
                icon,
            };
            let result = service.update(found.id, update)?;
            println!("Updated goal: {}", result.goal.name);
            celebrate(result.celebration.as_ref());
        }

        GoalCommands::Delete { goal } => {
            let found = service.resolve(&goal)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted goal: {}", deleted.name);
        }

        GoalCommands::Deposit {
            goal,
            amount,
            wallet,
            date,
        } => {
            let found = service.resolve(&goal)?;
            let wallet = WalletService::new(storage).resolve(&wallet)?;
            let deposit = service.deposit(
                found.id,
                parse_amount(&amount)?,
                wallet.id,
                parse_date_or_today(date.as_deref())?,
            )?;
            println!(
                "Saved toward {}: {} of {} ({:.0}%)",
                deposit.goal.name,
                deposit.goal.current_amount,
                deposit.goal.target_amount,
                deposit.goal.progress_percent()
            );
            print_record_outcome(&deposit.record);
            celebrate(deposit.celebration.as_ref());
        }
    }

    Ok(())
}
