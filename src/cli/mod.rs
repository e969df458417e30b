//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer. Each group has
//! a `*Commands` enum and a `handle_*_command` function.

pub mod audit;
pub mod bill;
pub mod budget;
pub mod export;
pub mod goal;
pub mod investment;
pub mod loan;
pub mod notification;
pub mod profile;
pub mod report;
pub mod transaction;
pub mod wallet;

pub use audit::handle_audit_command;
pub use bill::{handle_bill_command, BillCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, handle_import_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use investment::{handle_investment_command, InvestmentCommands};
pub use loan::{handle_loan_command, LoanCommands};
pub use notification::{handle_notification_command, NotificationCommands};
pub use profile::{handle_profile_command, ProfileCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use wallet::{handle_wallet_command, WalletCommands};

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::error::{PesoError, PesoResult};
use crate::models::period::parse_date;
use crate::models::{Money, WalletId};
use crate::services::RecordOutcome;
use crate::storage::Storage;

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an amount like "1,250.50" or "₱99"
pub(crate) fn parse_amount(input: &str) -> PesoResult<Money> {
    Money::parse(input).map_err(|e| {
        PesoError::Validation(format!(
            "Invalid amount '{}'. Use a format like '1250.50'. Error: {}",
            input, e
        ))
    })
}

pub(crate) fn parse_optional_amount(input: Option<String>) -> PesoResult<Option<Money>> {
    input.as_deref().map(parse_amount).transpose()
}

/// Parse a YYYY-MM-DD date, defaulting to today
pub(crate) fn parse_date_or_today(input: Option<&str>) -> PesoResult<NaiveDate> {
    match input {
        Some(s) => parse_day(s),
        None => Ok(today()),
    }
}

pub(crate) fn parse_day(input: &str) -> PesoResult<NaiveDate> {
    parse_date(input).map_err(|e| PesoError::Validation(e.to_string()))
}

pub(crate) fn parse_optional_day(input: Option<String>) -> PesoResult<Option<NaiveDate>> {
    input.as_deref().map(parse_day).transpose()
}

/// Open an output file for an export or report
pub(crate) fn create_output(path: &Path) -> PesoResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        PesoError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

pub(crate) fn wallet_names(storage: &Storage) -> PesoResult<HashMap<WalletId, String>> {
    Ok(storage
        .wallets
        .get_all()?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect())
}

/// Print the wallet change and any budget alert from a recorded transaction
pub(crate) fn print_record_outcome(outcome: &RecordOutcome) {
    println!(
        "  Wallet {}: {}",
        outcome.wallet.name, outcome.wallet.balance
    );
    if let Some(budget) = &outcome.budget {
        println!(
            "  Budget {}: {} of {} ({:.0}%)",
            budget.category,
            budget.spent,
            budget.limit,
            budget.usage_percent()
        );
    }
    if let Some(notification) = &outcome.notification {
        println!();
        println!("{}: {}", notification.title, notification.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50").unwrap().cents(), 125_050);
        assert!(matches!(
            parse_amount("lots"),
            Err(PesoError::Validation(_))
        ));
        assert!(matches!(
            parse_amount("99999999999999999"),
            Err(PesoError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_dates() {
        assert_eq!(
            parse_date_or_today(Some("2025-12-25")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()
        );
        assert_eq!(parse_date_or_today(None).unwrap(), today());
        assert!(parse_day("12/25/2025").is_err());
        assert_eq!(parse_optional_day(None).unwrap(), None);
    }
}
