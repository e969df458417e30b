//! PesoWise - personal finance tracker for the terminal
//!
//! Tracks wallets, income and expenses, monthly budgets, bills, loans,
//! savings goals and investments, all stored as local JSON documents.
//!
//! # Architecture
//!
//! - `config`: paths, settings and logging
//! - `error`: the crate error type
//! - `models`: domain records and money/period value types
//! - `storage`: JSON table storage
//! - `audit`: append-only audit log
//! - `services`: business rules
//! - `reports`: dashboard, net worth, spending, statement and calendar
//! - `export`: JSON/YAML backups and CSV exports
//! - `display`: terminal formatting
//! - `cli`: clap subcommands and their handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use pesowise::config::{PesoPaths, Settings};
//! use pesowise::storage::Storage;
//!
//! let paths = PesoPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PesoError, PesoResult};
