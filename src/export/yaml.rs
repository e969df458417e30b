//! YAML backup
//!
//! Same document as the JSON backup, for people who want to read it.

use std::io::Write;

use crate::error::{PesoError, PesoResult};
use crate::storage::Storage;

use super::backup::{restore, Backup, ImportSummary};

fn export_err(e: impl std::fmt::Display) -> PesoError {
    PesoError::Export(e.to_string())
}

/// Export the full database as YAML with a header comment
pub fn export_backup_yaml<W: Write>(storage: &Storage, writer: &mut W) -> PesoResult<()> {
    let backup = Backup::from_storage(storage)?;

    writeln!(writer, "# PesoWise Backup").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", backup.timestamp).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", env!("CARGO_PKG_VERSION")).map_err(export_err)?;
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(writer, "# Contains card details and balances. Keep it private.")
        .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &backup).map_err(export_err)?;

    Ok(())
}

/// Replace all local data with a YAML backup
pub fn import_backup_yaml(storage: &Storage, yaml_str: &str) -> PesoResult<ImportSummary> {
    let backup: Backup =
        serde_yaml::from_str(yaml_str).map_err(|e| PesoError::Import(e.to_string()))?;
    restore(storage, backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PesoPaths;
    use crate::models::{Money, Wallet, WalletType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export_has_header() {
        let (_temp, storage) = create_test_storage();
        storage
            .wallets
            .upsert(Wallet::with_balance("Maya", WalletType::Maya, Money::from_cents(500)))
            .unwrap();

        let mut out = Vec::new();
        export_backup_yaml(&storage, &mut out).unwrap();
        let yaml = String::from_utf8(out).unwrap();

        assert!(yaml.starts_with("# PesoWise Backup"));
        assert!(yaml.contains("name: Maya"));
        assert!(yaml.contains("userProfile:"));
    }

    #[test]
    fn test_yaml_restores() {
        let (_temp, storage) = create_test_storage();
        storage
            .wallets
            .upsert(Wallet::with_balance("Maya", WalletType::Maya, Money::from_cents(500)))
            .unwrap();
        let mut out = Vec::new();
        export_backup_yaml(&storage, &mut out).unwrap();

        let (_temp2, other) = create_test_storage();
        let summary = import_backup_yaml(&other, &String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(summary.wallets, 1);
        assert_eq!(
            other.wallets.get_by_name("maya").unwrap().unwrap().balance.cents(),
            500
        );
    }
}
