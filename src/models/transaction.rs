//! Transaction model
//!
//! An income or expense against a single wallet. Amounts are always stored
//! positive; the direction comes from the transaction type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TransactionId, WalletId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub date: NaiveDate,

    pub description: String,

    /// Always positive
    pub amount: Money,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Free-text category, matched to budgets case-insensitively
    pub category: String,

    pub wallet_id: WalletId,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        wallet_id: WalletId,
        date: NaiveDate,
        transaction_type: TransactionType,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            description: description.into(),
            amount,
            transaction_type,
            category: category.into(),
            wallet_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Effect on the wallet balance: +amount for income, -amount for expense
    pub fn signed_amount(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Whether the category matches `category`, ignoring case
    pub fn in_category(&self, category: &str) -> bool {
        self.category.trim().eq_ignore_ascii_case(category.trim())
    }

    /// Trim text fields in place
    pub fn normalize(&mut self) {
        self.category = self.category.trim().to_string();
        self.description = self.description.trim().to_string();
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        if self.description.chars().count() > 200 {
            return Err(TransactionValidationError::DescriptionTooLong(
                self.description.chars().count(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(
            f,
            "{} {} {}{} [{}]",
            self.date.format("%Y-%m-%d"),
            self.description,
            sign,
            self.amount,
            self.category
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount,
    EmptyCategory,
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than zero"),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 200)", len)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
