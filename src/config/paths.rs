//! Path management for PesoWise
//!
//! ## Path Resolution Order
//!
//! 1. `PESOWISE_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/pesowise` on Linux, `%APPDATA%\pesowise\config` on Windows)
//!
//! Each data directory holds exactly one user's books; it is the isolation
//! boundary between users.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::PesoError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "PESOWISE_DATA_DIR";

/// Manages all paths used by PesoWise
#[derive(Debug, Clone)]
pub struct PesoPaths {
    /// Base directory for all PesoWise data
    base_dir: PathBuf,
}

impl PesoPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PesoError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Data directory holding one JSON document per table
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn wallets_file(&self) -> PathBuf {
        self.data_dir().join("wallets.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn bills_file(&self) -> PathBuf {
        self.data_dir().join("bills.json")
    }

    pub fn loans_file(&self) -> PathBuf {
        self.data_dir().join("loans.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    pub fn investments_file(&self) -> PathBuf {
        self.data_dir().join("investments.json")
    }

    pub fn notifications_file(&self) -> PathBuf {
        self.data_dir().join("notifications.json")
    }

    pub fn profile_file(&self) -> PathBuf {
        self.data_dir().join("profile.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PesoError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PesoError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PesoError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if PesoWise has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, PesoError> {
    ProjectDirs::from("", "", "pesowise")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PesoError::Config("Could not determine a home directory".into()))
}
