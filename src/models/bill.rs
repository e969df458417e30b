//! Bill model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BillId;
use super::money::Money;

/// A payable obligation with a due date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,

    pub name: String,

    pub amount: Money,

    pub due_date: NaiveDate,

    #[serde(default)]
    pub is_paid: bool,

    /// Category used for the expense recorded when the bill is paid
    pub category: String,
}

impl Bill {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        due_date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: BillId::new(),
            name: name.into(),
            amount,
            due_date,
            is_paid: false,
            category: category.into(),
        }
    }

    /// Days from `today` until the due date (negative when overdue)
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    /// Unpaid and due within `window_days` (today counts, overdue doesn't)
    pub fn is_due_within(&self, today: NaiveDate, window_days: i64) -> bool {
        let days = self.days_until_due(today);
        !self.is_paid && (0..=window_days).contains(&days)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid && self.due_date < today
    }

    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.name.trim().is_empty() {
            return Err(BillValidationError::EmptyName);
        }
        if !self.amount.is_positive() {
            return Err(BillValidationError::NonPositiveAmount);
        }
        if self.category.trim().is_empty() {
            return Err(BillValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} due {}", self.name, self.amount, self.due_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillValidationError {
    EmptyName,
    NonPositiveAmount,
    EmptyCategory,
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Bill name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Bill amount must be greater than zero"),
            Self::EmptyCategory => write!(f, "Bill category cannot be empty"),
        }
    }
}

impl std::error::Error for BillValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_due_window() {
        let bill = Bill::new("Meralco", Money::from_cents(250000), date(10), "Utilities");
        assert!(bill.is_due_within(date(7), 3));
        assert!(bill.is_due_within(date(10), 3));
        assert!(!bill.is_due_within(date(6), 3));
        assert!(!bill.is_due_within(date(11), 3));
        assert!(bill.is_overdue(date(11)));
    }

    #[test]
    fn test_paid_bill_is_never_due() {
        let mut bill = Bill::new("Internet", Money::from_cents(169900), date(10), "Utilities");
        bill.is_paid = true;
        assert!(!bill.is_due_within(date(9), 3));
        assert!(!bill.is_overdue(date(20)));
    }

    #[test]
    fn test_validation() {
        let mut bill = Bill::new("Rent", Money::from_cents(1), date(1), "Housing");
        assert!(bill.validate().is_ok());
        bill.amount = Money::zero();
        assert_eq!(bill.validate(), Err(BillValidationError::NonPositiveAmount));
    }
}
