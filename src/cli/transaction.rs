//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::{PesoError, PesoResult};
use crate::models::{Month, Transaction, TransactionType};
use crate::services::{NewTransaction, TransactionFilter, TransactionService, WalletService};
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today, parse_day, print_record_outcome, wallet_names};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// Wallet name or ID
        wallet: String,
        /// Amount (e.g., "250" or "1,250.50")
        amount: String,
        /// Category (e.g., Food, Transportation, Salary)
        #[arg(short, long)]
        category: String,
        /// Record as income instead of an expense
        #[arg(short, long)]
        income: bool,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by wallet name or ID
        #[arg(short, long)]
        wallet: Option<String>,
        /// Filter by type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Month (YYYY-MM)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        month: Option<String>,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,
        /// Text to look for in description or category
        #[arg(short, long)]
        search: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show a transaction
    Show {
        /// Transaction ID
        id: String,
    },
    /// Delete a transaction and reverse its effects
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Build a filter from list options
pub(crate) fn build_filter(
    storage: &Storage,
    wallet: Option<&str>,
    kind: Option<&str>,
    category: Option<String>,
    month: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> PesoResult<TransactionFilter> {
    let mut filter = TransactionFilter::new();

    if let Some(wallet) = wallet {
        filter = filter.wallet(WalletService::new(storage).resolve(wallet)?.id);
    }
    if let Some(kind) = kind {
        let kind = TransactionType::parse(kind).ok_or_else(|| {
            PesoError::Validation(format!(
                "Invalid type: '{}'. Use income or expense",
                kind
            ))
        })?;
        filter = filter.kind(kind);
    }
    if let Some(category) = category {
        filter = filter.category(category);
    }
    if let Some(month) = month {
        let month = Month::parse(month).map_err(|e| PesoError::Validation(e.to_string()))?;
        filter = filter.date_range(month.first_day(), month.last_day());
    }
    if let Some(from) = from {
        filter.start_date = Some(parse_day(from)?);
    }
    if let Some(to) = to {
        filter.end_date = Some(parse_day(to)?);
    }

    Ok(filter)
}

fn require(service: &TransactionService, id: &str) -> PesoResult<Transaction> {
    service
        .find(id)?
        .ok_or_else(|| PesoError::transaction_not_found(id))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PesoResult<()> {
    let service = TransactionService::new(storage).with_warning_percent(settings.budget_warning_percent);

    match cmd {
        TransactionCommands::Add {
            wallet,
            amount,
            category,
            income,
            description,
            date,
        } => {
            let wallet = WalletService::new(storage).resolve(&wallet)?;
            let transaction_type = if income {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };

            let outcome = service.record(NewTransaction {
                wallet_id: wallet.id,
                date: parse_date_or_today(date.as_deref())?,
                transaction_type,
                amount: parse_amount(&amount)?,
                category,
                description,
            })?;

            let txn = &outcome.transaction;
            println!(
                "Recorded {}: {} ({})",
                txn.transaction_type, txn.amount, txn.category
            );
            println!("  ID: {}", txn.id);
            print_record_outcome(&outcome);
        }

        TransactionCommands::List {
            wallet,
            kind,
            category,
            month,
            from,
            to,
            search,
            limit,
        } => {
            let mut filter = build_filter(
                storage,
                wallet.as_deref(),
                kind.as_deref(),
                category,
                month.as_deref(),
                from.as_deref(),
                to.as_deref(),
            )?
            .limit(limit);
            filter.search = search;

            let transactions = service.list(&filter)?;
            println!(
                "{}",
                format_transaction_list(&transactions, &wallet_names(storage)?)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = require(&service, &id)?;
            let wallet = storage
                .wallets
                .get(txn.wallet_id)?
                .map(|w| w.name)
                .unwrap_or_else(|| "Unknown".to_string());
            print!("{}", format_transaction_details(&txn, &wallet));
        }

        TransactionCommands::Delete { id } => {
            let txn = require(&service, &id)?;
            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted {} of {} ({})",
                deleted.transaction_type, deleted.amount, deleted.category
            );
        }
    }

    Ok(())
}
