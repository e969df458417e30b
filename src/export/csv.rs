//! CSV export
//!
//! Spreadsheet-friendly dumps of transactions and wallets.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{PesoError, PesoResult};
use crate::models::WalletId;
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> PesoError {
    PesoError::Export(e.to_string())
}

/// Export transactions matching `filter`, newest first
pub fn export_transactions_csv<W: Write>(
    storage: &Storage,
    writer: W,
    filter: &TransactionFilter,
) -> PesoResult<usize> {
    let wallet_names: HashMap<WalletId, String> = storage
        .wallets
        .get_all()?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();

    let transactions = TransactionService::new(storage).list(filter)?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Date", "Description", "Category", "Type", "Amount", "Wallet"])
        .map_err(export_err)?;

    for txn in &transactions {
        let wallet = wallet_names
            .get(&txn.wallet_id)
            .map(String::as_str)
            .unwrap_or("Unknown");
        csv.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.description.clone(),
            txn.category.clone(),
            txn.transaction_type.to_string(),
            format!("{:.2}", txn.amount.as_f64()),
            wallet.to_string(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)?;
    Ok(transactions.len())
}

/// Export wallets with their balances
pub fn export_wallets_csv<W: Write>(storage: &Storage, writer: W) -> PesoResult<usize> {
    let wallets = storage.wallets.get_all()?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Name", "Type", "Balance", "Account Number"])
        .map_err(export_err)?;

    for wallet in &wallets {
        csv.write_record([
            wallet.name.clone(),
            wallet.wallet_type.to_string(),
            format!("{:.2}", wallet.balance.as_f64()),
            wallet.masked_account_number().unwrap_or_default(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)?;
    Ok(wallets.len())
}
