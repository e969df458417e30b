//! First-run setup
//!
//! Creates the directory layout, the settings file, the default profile and
//! an empty document for every table.

use crate::config::{PesoPaths, Settings};
use crate::error::PesoError;
use crate::models::UserProfile;

use super::file_io::write_json_atomic;

/// Initialize a data directory; existing files are left untouched
pub fn initialize_storage(paths: &PesoPaths) -> Result<(), PesoError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.profile_file().exists() {
        write_json_atomic(paths.profile_file(), &UserProfile::default())?;
    }

    let empty: Vec<serde_json::Value> = Vec::new();
    for table in [
        paths.wallets_file(),
        paths.transactions_file(),
        paths.budgets_file(),
        paths.bills_file(),
        paths.loans_file(),
        paths.goals_file(),
        paths.investments_file(),
        paths.notifications_file(),
    ] {
        if !table.exists() {
            write_json_atomic(&table, &empty)?;
        }
    }

    tracing::info!(path = %paths.base_dir().display(), "initialized data directory");
    Ok(())
}

/// Whether `initialize_storage` still needs to run
pub fn needs_initialization(paths: &PesoPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.wallets_file().exists());
        assert!(paths.notifications_file().exists());
        let profile: UserProfile =
            serde_json::from_str(&std::fs::read_to_string(paths.profile_file()).unwrap()).unwrap();
        assert_eq!(profile.currency, "PHP");
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        std::fs::write(paths.bills_file(), r#"[{"custom": true}]"#).unwrap();
        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.bills_file()).unwrap();
        assert!(content.contains("custom"));
    }
}
