//! Loan CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_loan_list;
use crate::error::{PesoError, PesoResult};
use crate::models::LoanType;
use crate::services::loan::{LoanUpdate, NewLoan};
use crate::services::{LoanService, WalletService};
use crate::storage::Storage;

use super::{
    parse_amount, parse_date_or_today, parse_day, parse_optional_amount, parse_optional_day,
    print_record_outcome,
};

/// Loan subcommands
#[derive(Subcommand)]
pub enum LoanCommands {
    /// Track money borrowed or lent
    Create {
        /// Who the loan is with or what it is for
        name: String,
        /// Total amount
        amount: String,
        /// borrow (I owe) or lent (owed to me)
        #[arg(short = 't', long = "type", default_value = "borrow")]
        loan_type: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        /// Annual interest rate in percent
        #[arg(short, long, default_value = "0")]
        interest: f64,
    },
    /// List loans
    List {
        /// Only borrow or lent loans
        #[arg(short = 't', long = "type")]
        loan_type: Option<String>,
    },
    /// Edit a loan
    Edit {
        /// Loan name or ID
        loan: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        loan_type: Option<String>,
        /// Total amount
        #[arg(short, long)]
        amount: Option<String>,
        /// Override the paid amount
        #[arg(short, long)]
        paid: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long)]
        interest: Option<f64>,
    },
    /// Delete a loan
    Delete {
        /// Loan name or ID
        loan: String,
    },
    /// Record a repayment through a wallet
    Pay {
        /// Loan name or ID
        loan: String,
        /// Amount paid
        amount: String,
        /// Wallet name or ID
        #[arg(short, long)]
        wallet: String,
        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Totals owed by me and to me
    Summary,
}

fn parse_loan_type(input: &str) -> PesoResult<LoanType> {
    LoanType::parse(input).ok_or_else(|| {
        PesoError::Validation(format!(
            "Invalid loan type: '{}'. Use borrow or lent",
            input
        ))
    })
}

/// Handle a loan command
pub fn handle_loan_command(
    storage: &Storage,
    settings: &Settings,
    cmd: LoanCommands,
) -> PesoResult<()> {
    let service = LoanService::new(storage).with_warning_percent(settings.budget_warning_percent);

    match cmd {
        LoanCommands::Create {
            name,
            amount,
            loan_type,
            due,
            interest,
        } => {
            let loan = service.create(NewLoan {
                name,
                loan_type: parse_loan_type(&loan_type)?,
                total_amount: parse_amount(&amount)?,
                due_date: parse_day(&due)?,
                interest_rate: interest,
            })?;
            println!("Created loan: {} ({}, {})", loan.name, loan.loan_type, loan.total_amount);
            println!("  ID: {}", loan.id);
        }

        LoanCommands::List { loan_type } => {
            let loan_type = loan_type.as_deref().map(parse_loan_type).transpose()?;
            println!("{}", format_loan_list(&service.list(loan_type)?));
        }

        LoanCommands::Edit {
            loan,
            name,
            loan_type,
            amount,
            paid,
            due,
            interest,
        } => {
            let found = service.resolve(&loan)?;
            let update = LoanUpdate {
                name,
                loan_type: loan_type.as_deref().map(parse_loan_type).transpose()?,
                total_amount: parse_optional_amount(amount)?,
                paid_amount: parse_optional_amount(paid)?,
                due_date: parse_optional_day(due)?,
                interest_rate: interest,
            };
            let updated = service.update(found.id, update)?;
            println!("Updated loan: {}", updated.name);
        }

        LoanCommands::Delete { loan } => {
            let found = service.resolve(&loan)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted loan: {}", deleted.name);
        }

        LoanCommands::Pay {
            loan,
            amount,
            wallet,
            date,
        } => {
            let found = service.resolve(&loan)?;
            let wallet = WalletService::new(storage).resolve(&wallet)?;
            let payment = service.record_payment(
                found.id,
                parse_amount(&amount)?,
                wallet.id,
                parse_date_or_today(date.as_deref())?,
            )?;
            println!(
                "Recorded payment on {}: {} remaining",
                payment.loan.name,
                payment.loan.remaining()
            );
            print_record_outcome(&payment.record);
        }

        LoanCommands::Summary => {
            let totals = service.totals()?;
            println!("I owe:        {}", totals.owed_by_me);
            println!("Owed to me:   {}", totals.owed_to_me);
        }
    }

    Ok(())
}
