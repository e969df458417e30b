//! JSON backup
//!
//! Writes and restores the camelCase backup document.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::{PesoError, PesoResult};
use crate::storage::Storage;

use super::backup::{restore, Backup, ImportSummary};

/// File name offered for a backup made on `date`
pub fn default_backup_file_name(date: NaiveDate) -> String {
    format!("PesoWise_Backup_{}.json", date.format("%m-%d-%Y"))
}

/// Export the full database as a JSON backup
pub fn export_backup_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> PesoResult<()> {
    let backup = Backup::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &backup)
    } else {
        serde_json::to_writer(&mut *writer, &backup)
    }
    .map_err(|e| PesoError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PesoError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON backup without touching storage
pub fn parse_backup_json(json_str: &str) -> PesoResult<Backup> {
    let backup: Backup =
        serde_json::from_str(json_str).map_err(|e| PesoError::Import(e.to_string()))?;
    backup.validate()?;
    Ok(backup)
}

/// Replace all local data with a JSON backup
pub fn import_backup_json(storage: &Storage, json_str: &str) -> PesoResult<ImportSummary> {
    let backup = parse_backup_json(json_str)?;
    restore(storage, backup)
}
