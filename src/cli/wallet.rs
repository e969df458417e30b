//! Wallet CLI commands

use clap::Subcommand;

use crate::display::{format_drift_report, format_wallet_details, format_wallet_list};
use crate::error::{PesoError, PesoResult};
use crate::models::{CardDetails, WalletType};
use crate::services::wallet::{NewWallet, WalletUpdate};
use crate::services::WalletService;
use crate::storage::Storage;

use super::parse_amount;

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Create a new wallet
    Create {
        /// Wallet name
        name: String,
        /// Wallet type (Cash, GCash, Maya, BDO, BPI, ...)
        #[arg(short = 't', long = "type", default_value = "Cash")]
        wallet_type: String,
        /// Opening balance (e.g., "1500" or "1,500.00")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Display color
        #[arg(long)]
        color: Option<String>,
        /// Account or card number
        #[arg(long)]
        account_number: Option<String>,
        /// Name on the account
        #[arg(long)]
        account_name: Option<String>,
        /// Card expiry (MM/YY)
        #[arg(long)]
        expiry: Option<String>,
        /// Card CVV
        #[arg(long)]
        cvv: Option<String>,
    },
    /// List all wallets
    List,
    /// Show wallet details
    Show {
        /// Wallet name or ID
        wallet: String,
    },
    /// Edit a wallet (pass an empty string to clear a card field)
    Edit {
        /// Wallet name or ID
        wallet: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        wallet_type: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        account_number: Option<String>,
        #[arg(long)]
        account_name: Option<String>,
        #[arg(long)]
        expiry: Option<String>,
        #[arg(long)]
        cvv: Option<String>,
    },
    /// Overwrite a wallet's balance
    SetBalance {
        /// Wallet name or ID
        wallet: String,
        /// New balance
        #[arg(allow_hyphen_values = true)]
        balance: String,
    },
    /// Delete a wallet
    Delete {
        /// Wallet name or ID
        wallet: String,
        /// Also delete the wallet's transactions
        #[arg(short, long)]
        force: bool,
    },
    /// Check stored balances against transactions
    Verify,
    /// Reset drifted balances to what the transactions say
    Repair,
}

fn parse_wallet_type(input: &str) -> PesoResult<WalletType> {
    WalletType::parse(input).ok_or_else(|| {
        let valid: Vec<&str> = WalletType::ALL.iter().map(|t| t.label()).collect();
        PesoError::Validation(format!(
            "Invalid wallet type: '{}'. Valid types: {}",
            input,
            valid.join(", ")
        ))
    })
}

/// Handle a wallet command
pub fn handle_wallet_command(storage: &Storage, cmd: WalletCommands) -> PesoResult<()> {
    let service = WalletService::new(storage);

    match cmd {
        WalletCommands::Create {
            name,
            wallet_type,
            balance,
            color,
            account_number,
            account_name,
            expiry,
            cvv,
        } => {
            let mut input =
                NewWallet::new(name, parse_wallet_type(&wallet_type)?).balance(parse_amount(&balance)?);
            input.color = color;
            input.card = CardDetails {
                account_number,
                account_name,
                expiry_date: expiry,
                cvv,
            };

            let wallet = service.create(input)?;
            println!("Created wallet: {}", wallet.name);
            println!("  Type:    {}", wallet.wallet_type);
            println!("  Balance: {}", wallet.balance);
            println!("  ID:      {}", wallet.id);
        }

        WalletCommands::List => {
            println!("{}", format_wallet_list(&service.list()?));
        }

        WalletCommands::Show { wallet } => {
            let found = service.resolve(&wallet)?;
            let count = storage.transactions.count_for_wallet(found.id)?;
            print!("{}", format_wallet_details(&found, count));
        }

        WalletCommands::Edit {
            wallet,
            name,
            wallet_type,
            color,
            account_number,
            account_name,
            expiry,
            cvv,
        } => {
            let found = service.resolve(&wallet)?;
            let update = WalletUpdate {
                name,
                wallet_type: wallet_type.as_deref().map(parse_wallet_type).transpose()?,
                color,
                account_number,
                account_name,
                expiry_date: expiry,
                cvv,
            };

            let updated = service.update(found.id, update)?;
            println!("Updated wallet: {}", updated.name);
        }

        WalletCommands::SetBalance { wallet, balance } => {
            let found = service.resolve(&wallet)?;
            let updated = service.set_balance(found.id, parse_amount(&balance)?)?;
            println!("{} balance set to {}", updated.name, updated.balance);
        }

        WalletCommands::Delete { wallet, force } => {
            let found = service.resolve(&wallet)?;
            let deletion = service.delete(found.id, force)?;
            println!("Deleted wallet: {}", deletion.wallet.name);
            if deletion.removed_transactions > 0 {
                println!(
                    "  Removed {} transaction(s)",
                    deletion.removed_transactions
                );
            }
        }

        WalletCommands::Verify => {
            println!("{}", format_drift_report(&service.verify()?));
        }

        WalletCommands::Repair => {
            let repaired = service.repair()?;
            if repaired.is_empty() {
                println!("Nothing to repair.");
            }
            for drift in repaired {
                println!(
                    "Repaired {}: {} -> {}",
                    drift.name, drift.stored, drift.expected
                );
            }
        }
    }

    Ok(())
}
