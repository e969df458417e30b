//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_list;
use crate::error::{PesoError, PesoResult};
use crate::models::Month;
use crate::services::budget::BudgetUpdate;
use crate::services::{BudgetService, WalletService};
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today, parse_optional_amount, print_record_outcome};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a monthly budget for a category
    Create {
        /// Category name (matched to transactions ignoring case)
        category: String,
        /// Monthly limit
        limit: String,
        /// Display color
        #[arg(long)]
        color: Option<String>,
    },
    /// Show every budget with its usage
    List,
    /// Edit a budget
    Edit {
        /// Budget category or ID
        budget: String,
        /// Rename the category
        #[arg(short, long)]
        category: Option<String>,
        /// New limit
        #[arg(short, long)]
        limit: Option<String>,
        /// Override the spent amount
        #[arg(short, long)]
        spent: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget category or ID
        budget: String,
    },
    /// Record spending against a budget from a wallet
    Spend {
        /// Budget category or ID
        budget: String,
        /// Amount spent
        amount: String,
        /// Wallet name or ID
        #[arg(short, long)]
        wallet: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Recompute spent from a month's expenses
    Recalculate {
        /// Month (YYYY-MM, defaults to the current month)
        month: Option<String>,
    },
    /// Set spent back to zero for every budget
    Reset,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> PesoResult<()> {
    let service = BudgetService::new(storage).with_warning_percent(settings.budget_warning_percent);

    match cmd {
        BudgetCommands::Create {
            category,
            limit,
            color,
        } => {
            let budget = service.create(&category, parse_amount(&limit)?, color)?;
            println!("Created budget: {} ({} / month)", budget.category, budget.limit);
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List => {
            println!("{}", format_budget_list(&service.usage()?));
        }

        BudgetCommands::Edit {
            budget,
            category,
            limit,
            spent,
            color,
        } => {
            let found = service.resolve(&budget)?;
            let update = BudgetUpdate {
                category,
                limit: parse_optional_amount(limit)?,
                spent: parse_optional_amount(spent)?,
                color,
            };
            let updated = service.update(found.id, update)?;
            println!(
                "Updated budget: {} ({} of {})",
                updated.category, updated.spent, updated.limit
            );
        }

        BudgetCommands::Delete { budget } => {
            let found = service.resolve(&budget)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted budget: {}", deleted.category);
        }

        BudgetCommands::Spend {
            budget,
            amount,
            wallet,
            date,
        } => {
            let found = service.resolve(&budget)?;
            let wallet = WalletService::new(storage).resolve(&wallet)?;
            let outcome = service.spend(
                found.id,
                parse_amount(&amount)?,
                wallet.id,
                parse_date_or_today(date.as_deref())?,
            )?;
            println!(
                "Spent {} on {}",
                outcome.transaction.amount, outcome.transaction.category
            );
            print_record_outcome(&outcome);
        }

        BudgetCommands::Recalculate { month } => {
            let month = match month {
                Some(m) => Month::parse(&m).map_err(|e| PesoError::Validation(e.to_string()))?,
                None => Month::current(),
            };
            let budgets = service.recalculate(month)?;
            println!("Recalculated {} budget(s) from {}", budgets.len(), month.label());
        }

        BudgetCommands::Reset => {
            let budgets = service.reset()?;
            println!("Reset spent for {} budget(s)", budgets.len());
        }
    }

    Ok(())
}
