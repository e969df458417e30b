//! User settings for PesoWise
//!
//! Manages preferences such as the currency symbol, reminder windows and
//! budget warning threshold.

use serde::{Deserialize, Serialize};

use super::paths::PesoPaths;
use crate::error::PesoError;

/// User settings for PesoWise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Unpaid bills due within this many days raise a reminder
    #[serde(default = "default_bill_reminder_days")]
    pub bill_reminder_days: i64,

    /// Percentage of a budget limit that raises a warning
    #[serde(default = "default_budget_warning_percent")]
    pub budget_warning_percent: u8,

    /// Number of transactions shown on the dashboard
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,

    /// Default tracing filter when `PESOWISE_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_bill_reminder_days() -> i64 {
    3
}

fn default_budget_warning_percent() -> u8 {
    80
}

fn default_recent_transactions() -> usize {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
            bill_reminder_days: default_bill_reminder_days(),
            budget_warning_percent: default_budget_warning_percent(),
            recent_transactions: default_recent_transactions(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &PesoPaths) -> Result<Self, PesoError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PesoError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| PesoError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PesoPaths) -> Result<(), PesoError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PesoError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PesoError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the services cannot work with
    pub fn validate(&self) -> Result<(), PesoError> {
        if self.bill_reminder_days < 0 {
            return Err(PesoError::Config(
                "bill_reminder_days cannot be negative".into(),
            ));
        }
        if self.budget_warning_percent == 0 || self.budget_warning_percent >= 100 {
            return Err(PesoError::Config(format!(
                "budget_warning_percent must be between 1 and 99, got {}",
                self.budget_warning_percent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₱");
        assert_eq!(settings.bill_reminder_days, 3);
        assert_eq!(settings.budget_warning_percent, 80);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.bill_reminder_days = 7;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.bill_reminder_days, 7);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "$"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.budget_warning_percent, 80);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_invalid_warning_percent_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"budget_warning_percent": 120}"#).unwrap();

        assert!(Settings::load_or_create(&paths).is_err());
    }
}
