//! Budget category model
//!
//! A monthly spending cap for one transaction category, with the running
//! total spent against it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

/// Default warning threshold, as a percentage of the limit
pub const DEFAULT_WARNING_PERCENT: u8 = 80;

/// Default accent color for new budgets
pub const DEFAULT_BUDGET_COLOR: &str = "#10b981";

/// A spending limit for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: BudgetId,

    /// Category name, unique ignoring case
    pub category: String,

    /// Spending limit (must be positive)
    pub limit: Money,

    /// Amount spent so far
    pub spent: Money,

    pub color: String,
}

/// A usage threshold that was crossed by a spend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetThreshold {
    /// Spending reached the warning percentage
    Warning,
    /// Spending reached or passed the limit
    Exceeded,
}

impl BudgetCategory {
    pub fn new(category: impl Into<String>, limit: Money) -> Self {
        Self {
            id: BudgetId::new(),
            category: category.into(),
            limit,
            spent: Money::zero(),
            color: DEFAULT_BUDGET_COLOR.to_string(),
        }
    }

    /// Whether this budget covers `category`, ignoring case
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.trim().eq_ignore_ascii_case(category.trim())
    }

    /// Amount left before the limit (negative when overspent)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }

    /// Spent as a fraction of the limit
    pub fn usage(&self) -> f64 {
        self.spent.ratio_of(self.limit).unwrap_or(0.0)
    }

    /// Spent as a percentage of the limit, uncapped
    pub fn usage_percent(&self) -> f64 {
        self.usage() * 100.0
    }

    /// Percentage for a progress bar, capped at 100
    pub fn bar_percent(&self) -> f64 {
        self.usage_percent().clamp(0.0, 100.0)
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }

    /// Add to spent and report which threshold, if any, was crossed
    pub fn add_spent(&mut self, amount: Money, warning_percent: u8) -> Option<BudgetThreshold> {
        let old = self.spent;
        self.spent += amount;
        threshold_crossed(self.limit, old, self.spent, warning_percent)
    }

    /// Remove from spent, never going below zero
    pub fn remove_spent(&mut self, amount: Money) {
        self.spent = self.spent.saturating_sub_to_zero(amount);
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }

        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit);
        }

        if self.spent.is_negative() {
            return Err(BudgetValidationError::NegativeSpent);
        }

        Ok(())
    }
}

/// Which threshold, if any, moving from `old` to `new` spent crosses
///
/// Only the highest crossed threshold is reported. Nothing is reported when
/// spending was already past a threshold before the move.
pub fn threshold_crossed(
    limit: Money,
    old: Money,
    new: Money,
    warning_percent: u8,
) -> Option<BudgetThreshold> {
    if !limit.is_positive() {
        return None;
    }

    let limit = limit.cents() as i128;
    let (old, new) = (old.cents() as i128, new.cents() as i128);

    if old < limit && new >= limit {
        return Some(BudgetThreshold::Exceeded);
    }

    let warn = limit * warning_percent as i128;
    if old * 100 < warn && new * 100 >= warn {
        return Some(BudgetThreshold::Warning);
    }

    None
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} of {}", self.category, self.spent, self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NonPositiveLimit,
    NegativeSpent,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
            Self::NonPositiveLimit => write!(f, "Budget limit must be greater than zero"),
            Self::NegativeSpent => write!(f, "Spent amount cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(limit: i64, spent: i64) -> BudgetCategory {
        let mut b = BudgetCategory::new("Food", Money::from_cents(limit));
        b.spent = Money::from_cents(spent);
        b
    }

    #[test]
    fn test_usage() {
        let b = budget(10000, 2500);
        assert_eq!(b.usage_percent(), 25.0);
        assert_eq!(b.remaining().cents(), 7500);

        let over = budget(10000, 15000);
        assert_eq!(over.bar_percent(), 100.0);
        assert!(over.is_over());
    }

    #[test]
    fn test_crossing_warning() {
        let mut b = budget(10000, 7000);
        assert_eq!(b.add_spent(Money::from_cents(1000), 80), Some(BudgetThreshold::Warning));
        assert_eq!(b.spent.cents(), 8000);
    }

    #[test]
    fn test_crossing_limit_beats_warning() {
        let mut b = budget(10000, 5000);
        assert_eq!(
            b.add_spent(Money::from_cents(6000), 80),
            Some(BudgetThreshold::Exceeded)
        );
    }

    #[test]
    fn test_no_repeat_when_already_past() {
        let mut b = budget(10000, 8500);
        assert_eq!(b.add_spent(Money::from_cents(500), 80), None);

        let mut over = budget(10000, 10000);
        assert_eq!(over.add_spent(Money::from_cents(500), 80), None);
    }

    #[test]
    fn test_exactly_at_limit_counts_as_exceeded() {
        assert_eq!(
            threshold_crossed(
                Money::from_cents(10000),
                Money::from_cents(9000),
                Money::from_cents(10000),
                80
            ),
            Some(BudgetThreshold::Exceeded)
        );
    }

    #[test]
    fn test_remove_spent_saturates() {
        let mut b = budget(10000, 300);
        b.remove_spent(Money::from_cents(500));
        assert_eq!(b.spent, Money::zero());
    }

    #[test]
    fn test_matches_category() {
        let b = budget(100, 0);
        assert!(b.matches_category("food"));
        assert!(b.matches_category("FOOD "));
        assert!(!b.matches_category("Foods"));
    }

    #[test]
    fn test_validation() {
        assert!(budget(100, 0).validate().is_ok());
        assert_eq!(
            budget(0, 0).validate(),
            Err(BudgetValidationError::NonPositiveLimit)
        );
        let mut b = budget(100, 0);
        b.category = "".into();
        assert_eq!(b.validate(), Err(BudgetValidationError::EmptyCategory));
    }
}
