//! Loan model
//!
//! Money either borrowed from someone or lent to someone, with repayment
//! progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LoanId;
use super::money::Money;

/// Direction of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    /// I owe this money
    #[default]
    Borrow,
    /// Someone owes me this money
    Lent,
}

impl LoanType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "borrow" | "borrowed" => Some(Self::Borrow),
            "lent" | "lend" => Some(Self::Lent),
            _ => None,
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrow => write!(f, "Borrowed"),
            Self::Lent => write!(f, "Lent"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,

    pub name: String,

    pub total_amount: Money,

    pub paid_amount: Money,

    pub due_date: NaiveDate,

    /// Annual interest rate in percent
    #[serde(default)]
    pub interest_rate: f64,

    #[serde(rename = "type")]
    pub loan_type: LoanType,
}

impl Loan {
    pub fn new(
        name: impl Into<String>,
        loan_type: LoanType,
        total_amount: Money,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: LoanId::new(),
            name: name.into(),
            total_amount,
            paid_amount: Money::zero(),
            due_date,
            interest_rate: 0.0,
            loan_type,
        }
    }

    /// Amount still outstanding, never negative
    pub fn remaining(&self) -> Money {
        self.total_amount.saturating_sub_to_zero(self.paid_amount)
    }

    /// Repayment progress in percent, capped at 100
    pub fn progress_percent(&self) -> f64 {
        let ratio = self.paid_amount.ratio_of(self.total_amount).unwrap_or(0.0);
        (ratio * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_settled(&self) -> bool {
        self.remaining().is_zero()
    }

    pub fn validate(&self) -> Result<(), LoanValidationError> {
        if self.name.trim().is_empty() {
            return Err(LoanValidationError::EmptyName);
        }
        if !self.total_amount.is_positive() {
            return Err(LoanValidationError::NonPositiveTotal);
        }
        if self.paid_amount.is_negative() {
            return Err(LoanValidationError::NegativePaid);
        }
        if !self.interest_rate.is_finite() || self.interest_rate < 0.0 {
            return Err(LoanValidationError::InvalidInterestRate);
        }
        Ok(())
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} of {} paid",
            self.name, self.loan_type, self.paid_amount, self.total_amount
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanValidationError {
    EmptyName,
    NonPositiveTotal,
    NegativePaid,
    InvalidInterestRate,
}

impl fmt::Display for LoanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Loan name cannot be empty"),
            Self::NonPositiveTotal => write!(f, "Loan total must be greater than zero"),
            Self::NegativePaid => write!(f, "Paid amount cannot be negative"),
            Self::InvalidInterestRate => write!(f, "Interest rate must be zero or more"),
        }
    }
}

impl std::error::Error for LoanValidationError {}
