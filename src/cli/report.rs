//! Report CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_transaction_list;
use crate::error::{PesoError, PesoResult};
use crate::models::{DateRange, Month};
use crate::reports::{
    transactions_on, CalendarMonth, DashboardReport, NetWorthReport, SpendingReport,
    StatementOptions, StatementReport,
};
use crate::storage::Storage;

use super::{create_output, parse_day, wallet_names};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Balances, bills, budgets, goals and recent activity
    Dashboard,

    /// Assets, liabilities and net worth
    NetWorth {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expenses per category
    Spending {
        /// Month (YYYY-MM) or range (YYYY-MM-DD..YYYY-MM-DD), defaults to this month
        #[arg(short, long)]
        period: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Printable financial statement
    Statement {
        /// Month (YYYY-MM) or range (YYYY-MM-DD..YYYY-MM-DD), defaults to this month
        #[arg(short, long)]
        period: Option<String>,

        #[arg(long)]
        no_summary: bool,

        #[arg(long)]
        no_wallets: bool,

        #[arg(long)]
        no_breakdown: bool,

        #[arg(long)]
        no_transactions: bool,

        /// Write to a text file instead of the terminal
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month calendar of activity
    Calendar {
        /// Month (YYYY-MM), defaults to this month
        #[arg(short, long)]
        month: Option<String>,

        /// List the transactions on one day (YYYY-MM-DD)
        #[arg(short, long)]
        day: Option<String>,
    },
}

fn parse_range(period: Option<&str>) -> PesoResult<DateRange> {
    match period {
        Some(p) => DateRange::parse(p).map_err(|e| {
            PesoError::Validation(format!(
                "Invalid period: {}. Use YYYY-MM or YYYY-MM-DD..YYYY-MM-DD",
                e
            ))
        }),
        None => Ok(Month::current().range()),
    }
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> PesoResult<()> {
    match cmd {
        ReportCommands::Dashboard => {
            let report = DashboardReport::generate(storage, settings.recent_transactions)?;
            print!("{}", report.format_terminal());
        }

        ReportCommands::NetWorth { output } => {
            let report = NetWorthReport::generate(storage)?;
            print!("{}", report.format_terminal());
            if let Some(path) = output {
                report.export_csv(create_output(&path)?)?;
                println!("\nExported to: {}", path.display());
            }
        }

        ReportCommands::Spending { period, output } => {
            let report = SpendingReport::generate(storage, parse_range(period.as_deref())?)?;
            print!("{}", report.format_terminal());
            if let Some(path) = output {
                report.export_csv(create_output(&path)?)?;
                println!("\nExported to: {}", path.display());
            }
        }

        ReportCommands::Statement {
            period,
            no_summary,
            no_wallets,
            no_breakdown,
            no_transactions,
            output,
        } => {
            let options = StatementOptions {
                summary: !no_summary,
                wallets: !no_wallets,
                breakdown: !no_breakdown,
                transactions: !no_transactions,
            };
            let report =
                StatementReport::generate(storage, parse_range(period.as_deref())?, options)?;
            let text = report.format_terminal();

            match output {
                Some(path) => {
                    std::fs::write(&path, text).map_err(|e| {
                        PesoError::Export(format!(
                            "Failed to write {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    println!("Statement written to: {}", path.display());
                }
                None => print!("{}", text),
            }
        }

        ReportCommands::Calendar { month, day } => {
            let day = day.as_deref().map(parse_day).transpose()?;
            let month = match (month, day) {
                (Some(m), _) => {
                    Month::parse(&m).map_err(|e| PesoError::Validation(e.to_string()))?
                }
                (None, Some(d)) => Month::of(d),
                (None, None) => Month::current(),
            };

            let calendar = CalendarMonth::generate(storage, month)?;
            print!("{}", calendar.format_terminal());

            if let Some(day) = day {
                println!("\nTransactions on {}", day);
                let transactions = transactions_on(storage, day)?;
                println!(
                    "{}",
                    format_transaction_list(&transactions, &wallet_names(storage)?)
                );
            }
        }
    }

    Ok(())
}
