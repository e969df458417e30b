//! Investment CLI commands

use clap::Subcommand;

use crate::display::{format_investment_list, format_portfolio};
use crate::error::{PesoError, PesoResult};
use crate::models::InvestmentType;
use crate::services::investment::{InvestmentUpdate, NewInvestment};
use crate::services::InvestmentService;
use crate::storage::Storage;

use super::{parse_amount, parse_optional_amount};

/// Investment subcommands
#[derive(Subcommand)]
pub enum InvestmentCommands {
    /// Add an investment
    Create {
        /// Investment name
        name: String,
        /// Amount invested
        invested: String,
        /// Current value (defaults to the invested amount)
        #[arg(short, long)]
        value: Option<String>,
        /// stock, crypto, bond, real_estate, fund or other
        #[arg(short = 't', long = "type", default_value = "stock")]
        investment_type: String,
        /// Ticker symbol
        #[arg(short, long)]
        symbol: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// List investments
    List,
    /// Edit an investment (pass an empty symbol to clear it)
    Edit {
        /// Investment name, symbol or ID
        investment: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        investment_type: Option<String>,
        #[arg(short, long)]
        invested: Option<String>,
        /// Current value
        #[arg(short, long)]
        value: Option<String>,
        #[arg(short, long)]
        symbol: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an investment
    Delete {
        /// Investment name, symbol or ID
        investment: String,
    },
    /// Portfolio totals
    Portfolio,
}

fn parse_investment_type(input: &str) -> PesoResult<InvestmentType> {
    InvestmentType::parse(input).ok_or_else(|| {
        PesoError::Validation(format!(
            "Invalid investment type: '{}'. Use stock, crypto, bond, real_estate, fund or other",
            input
        ))
    })
}

/// Handle an investment command
pub fn handle_investment_command(storage: &Storage, cmd: InvestmentCommands) -> PesoResult<()> {
    let service = InvestmentService::new(storage);

    match cmd {
        InvestmentCommands::Create {
            name,
            invested,
            value,
            investment_type,
            symbol,
            color,
        } => {
            let invested = parse_amount(&invested)?;
            let investment = service.create(NewInvestment {
                name,
                investment_type: parse_investment_type(&investment_type)?,
                invested_amount: invested,
                current_value: parse_optional_amount(value)?.unwrap_or(invested),
                symbol,
                color,
            })?;
            println!(
                "Created investment: {} ({}, {})",
                investment.name, investment.investment_type, investment.current_value
            );
            println!("  ID: {}", investment.id);
        }

        InvestmentCommands::List => {
            println!("{}", format_investment_list(&service.list()?));
        }

        InvestmentCommands::Edit {
            investment,
            name,
            investment_type,
            invested,
            value,
            symbol,
            color,
        } => {
            let found = service.resolve(&investment)?;
            let update = InvestmentUpdate {
                name,
                investment_type: investment_type
                    .as_deref()
                    .map(parse_investment_type)
                    .transpose()?,
                invested_amount: parse_optional_amount(invested)?,
                current_value: parse_optional_amount(value)?,
                symbol,
                color,
            };
            let updated = service.update(found.id, update)?;
            println!(
                "Updated investment: {} (gain {})",
                updated.name,
                updated.gain()
            );
        }

        InvestmentCommands::Delete { investment } => {
            let found = service.resolve(&investment)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted investment: {}", deleted.name);
        }

        InvestmentCommands::Portfolio => {
            print!("{}", format_portfolio(&service.portfolio()?));
        }
    }

    Ok(())
}
