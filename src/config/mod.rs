//! Configuration module for PesoWise
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence
//! - Diagnostic logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::PesoPaths;
pub use settings::Settings;
