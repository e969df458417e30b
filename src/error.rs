//! Custom error types for PesoWise
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for PesoWise operations
#[derive(Error, Debug)]
pub enum PesoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Budget-related errors
    #[error("Budget error: {0}")]
    Budget(String),

    /// A bill that has already been settled
    #[error("Bill is already paid: {0}")]
    AlreadyPaid(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PesoError {
    fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for wallets
    pub fn wallet_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Wallet", identifier)
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Transaction", identifier)
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Budget", identifier)
    }

    /// Create a "not found" error for bills
    pub fn bill_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Bill", identifier)
    }

    /// Create a "not found" error for loans
    pub fn loan_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Loan", identifier)
    }

    /// Create a "not found" error for savings goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Goal", identifier)
    }

    /// Create a "not found" error for investments
    pub fn investment_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Investment", identifier)
    }

    /// Create a "not found" error for notifications
    pub fn notification_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Notification", identifier)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PesoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PesoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for PesoWise operations
pub type PesoResult<T> = Result<T, PesoError>;
