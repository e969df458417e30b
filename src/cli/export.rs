//! CLI commands for export and import
//!
//! Backups are full snapshots in JSON or YAML. CSV exports cover
//! transactions and wallets only and cannot be imported back.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{PesoError, PesoResult};
use crate::export::{
    self, default_backup_file_name, export_backup_json, export_backup_yaml,
    export_transactions_csv, export_wallets_csv, parse_backup_json, Backup,
};
use crate::storage::Storage;

use super::transaction::build_filter;
use super::{create_output, today};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Full backup as JSON
    Json {
        /// Output file (defaults to PesoWise_Backup_MM-DD-YYYY.json)
        output: Option<PathBuf>,

        /// Write everything on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Full backup as YAML
    Yaml {
        /// Output file
        output: PathBuf,
    },

    /// Transactions as CSV
    Transactions {
        /// Output file
        output: PathBuf,
        #[arg(short, long)]
        wallet: Option<String>,
        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Month (YYYY-MM)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        month: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Wallets and balances as CSV
    Wallets {
        /// Output file
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> PesoResult<()> {
    match cmd {
        ExportCommands::Json { output, compact } => {
            let output =
                output.unwrap_or_else(|| PathBuf::from(default_backup_file_name(today())));
            let mut writer = create_output(&output)?;
            export_backup_json(storage, &mut writer, !compact)?;
            finish(writer)?;
            println!("Backup written to: {}", output.display());
        }

        ExportCommands::Yaml { output } => {
            let mut writer = create_output(&output)?;
            export_backup_yaml(storage, &mut writer)?;
            finish(writer)?;
            println!("Backup written to: {}", output.display());
        }

        ExportCommands::Transactions {
            output,
            wallet,
            kind,
            category,
            month,
            from,
            to,
        } => {
            let filter = build_filter(
                storage,
                wallet.as_deref(),
                kind.as_deref(),
                category,
                month.as_deref(),
                from.as_deref(),
                to.as_deref(),
            )?;
            let count = export_transactions_csv(storage, create_output(&output)?, &filter)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }

        ExportCommands::Wallets { output } => {
            let count = export_wallets_csv(storage, create_output(&output)?)?;
            println!("Exported {} wallets to: {}", count, output.display());
        }
    }

    Ok(())
}

fn finish<W: Write>(mut writer: W) -> PesoResult<()> {
    writer
        .flush()
        .map_err(|e| PesoError::Export(format!("Failed to write backup: {}", e)))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref(),
        Some("yaml" | "yml")
    )
}

fn read_backup(path: &Path) -> PesoResult<Backup> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        PesoError::Import(format!("Failed to read {}: {}", path.display(), e))
    })?;

    if is_yaml(path) {
        let backup: Backup =
            serde_yaml::from_str(&contents).map_err(|e| PesoError::Import(e.to_string()))?;
        backup.validate()?;
        Ok(backup)
    } else {
        parse_backup_json(&contents)
    }
}

/// Import a backup, replacing all local data
pub fn handle_import_command(storage: &Storage, file: PathBuf, force: bool) -> PesoResult<()> {
    let backup = read_backup(&file)?;

    println!("Backup: {}", file.display());
    println!("  Created:      {}", backup.timestamp.format("%Y-%m-%d %H:%M:%S"));
    println!("  Wallets:      {}", backup.wallets.len());
    println!("  Transactions: {}", backup.transactions.len());
    println!("  Budgets:      {}", backup.budgets.len());
    println!("  Bills:        {}", backup.bills.len());
    println!("  Loans:        {}", backup.loans.len());
    println!("  Goals:        {}", backup.goals.len());
    println!("  Investments:  {}", backup.investments.len());
    println!(
        "  Profile:      {}",
        if backup.user_profile.is_some() { "yes" } else { "no" }
    );

    if !force {
        println!();
        println!("Importing replaces ALL current data and clears notifications.");
        println!("Run again with --force to proceed.");
        return Ok(());
    }

    let summary = export::restore(storage, backup)?;
    println!();
    println!("Imported {} records.", summary.total());

    Ok(())
}
