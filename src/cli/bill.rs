//! Bill CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_bill_list;
use crate::error::PesoResult;
use crate::services::bill::BillUpdate;
use crate::services::{BillService, WalletService};
use crate::storage::Storage;

use super::{
    parse_amount, parse_date_or_today, parse_day, parse_optional_amount, parse_optional_day,
    print_record_outcome, today,
};

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Add a bill
    Create {
        /// Bill name (e.g., Meralco, PLDT)
        name: String,
        /// Amount due
        amount: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        /// Category, also used to match a budget when paid
        #[arg(short, long, default_value = "Bills")]
        category: String,
    },
    /// List bills by due date
    List {
        /// Only unpaid bills
        #[arg(short, long)]
        unpaid: bool,
    },
    /// Unpaid bills due within the reminder window
    Due {
        /// Days ahead to look (defaults to the bill_reminder_days setting)
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Edit a bill
    Edit {
        /// Bill name or ID
        bill: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a bill
    Delete {
        /// Bill name or ID
        bill: String,
    },
    /// Pay a bill from a wallet
    Pay {
        /// Bill name or ID
        bill: String,
        /// Wallet name or ID
        #[arg(short, long)]
        wallet: String,
        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark a paid bill as unpaid again
    Unpay {
        /// Bill name or ID
        bill: String,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BillCommands,
) -> PesoResult<()> {
    let service = BillService::new(storage).with_warning_percent(settings.budget_warning_percent);

    match cmd {
        BillCommands::Create {
            name,
            amount,
            due,
            category,
        } => {
            let bill = service.create(&name, parse_amount(&amount)?, parse_day(&due)?, &category)?;
            println!("Created bill: {} ({} due {})", bill.name, bill.amount, bill.due_date);
            println!("  ID: {}", bill.id);
        }

        BillCommands::List { unpaid } => {
            let bills = if unpaid {
                service.unpaid()?
            } else {
                service.list()?
            };
            println!("{}", format_bill_list(&bills, today()));
        }

        BillCommands::Due { days } => {
            let days = days.unwrap_or(settings.bill_reminder_days);
            let bills = service.due_soon(today(), days)?;
            if bills.is_empty() {
                println!("No bills due in the next {} day(s).", days);
            } else {
                println!("{}", format_bill_list(&bills, today()));
            }
        }

        BillCommands::Edit {
            bill,
            name,
            amount,
            due,
            category,
        } => {
            let found = service.resolve(&bill)?;
            let update = BillUpdate {
                name,
                amount: parse_optional_amount(amount)?,
                due_date: parse_optional_day(due)?,
                category,
            };
            let updated = service.update(found.id, update)?;
            println!("Updated bill: {}", updated.name);
        }

        BillCommands::Delete { bill } => {
            let found = service.resolve(&bill)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted bill: {}", deleted.name);
        }

        BillCommands::Pay { bill, wallet, date } => {
            let found = service.resolve(&bill)?;
            let wallet = WalletService::new(storage).resolve(&wallet)?;
            let payment = service.pay(found.id, wallet.id, parse_date_or_today(date.as_deref())?)?;
            println!("Paid {}: {}", payment.bill.name, payment.bill.amount);
            print_record_outcome(&payment.record);
        }

        BillCommands::Unpay { bill } => {
            let found = service.resolve(&bill)?;
            let updated = service.unpay(found.id)?;
            println!("Marked {} as unpaid", updated.name);
        }
    }

    Ok(())
}
