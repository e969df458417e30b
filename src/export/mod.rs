//! Export and import for PesoWise
//!
//! - JSON: the camelCase backup document, also used for restore
//! - YAML: the same document with a header comment
//! - CSV: transactions and wallets for spreadsheets

pub mod backup;
pub mod csv;
pub mod json;
pub mod yaml;

pub use backup::{restore, Backup, ImportSummary};
pub use csv::{export_transactions_csv, export_wallets_csv};
pub use json::{default_backup_file_name, export_backup_json, import_backup_json, parse_backup_json};
pub use yaml::{export_backup_yaml, import_backup_yaml};
