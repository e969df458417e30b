//! Savings goal model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// What a goal is saving for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Tech,
    Travel,
    Emergency,
    Shopping,
    Vehicle,
    Home,
    Education,
    #[default]
    Other,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 8] = [
        Self::Tech,
        Self::Travel,
        Self::Emergency,
        Self::Shopping,
        Self::Vehicle,
        Self::Home,
        Self::Education,
        Self::Other,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Travel => "travel",
            Self::Emergency => "emergency",
            Self::Shopping => "shopping",
            Self::Vehicle => "vehicle",
            Self::Home => "home",
            Self::Education => "education",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_GOAL_COLOR: &str = "#8b5cf6";
pub const DEFAULT_GOAL_ICON: &str = "target";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: GoalId,

    pub name: String,

    pub target_amount: Money,

    pub current_amount: Money,

    pub deadline: NaiveDate,

    pub color: String,

    pub icon: String,

    #[serde(default)]
    pub category: GoalCategory,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target_amount: Money, deadline: NaiveDate) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            deadline,
            color: DEFAULT_GOAL_COLOR.to_string(),
            icon: DEFAULT_GOAL_ICON.to_string(),
            category: GoalCategory::default(),
        }
    }

    pub fn remaining(&self) -> Money {
        self.target_amount.saturating_sub_to_zero(self.current_amount)
    }

    /// Progress in percent, capped at 100
    pub fn progress_percent(&self) -> f64 {
        let ratio = self.current_amount.ratio_of(self.target_amount).unwrap_or(0.0);
        (ratio * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_achieved(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        Ok(())
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {}",
            self.name, self.current_amount, self.target_amount
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    NegativeCurrent,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Goal target must be greater than zero"),
            Self::NegativeCurrent => write!(f, "Saved amount cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64, current: i64) -> SavingsGoal {
        let mut g = SavingsGoal::new(
            "Laptop",
            Money::from_cents(target),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        );
        g.current_amount = Money::from_cents(current);
        g
    }

    #[test]
    fn test_progress() {
        let g = goal(50000, 12500);
        assert_eq!(g.progress_percent(), 25.0);
        assert_eq!(g.remaining().cents(), 37500);
        assert!(!g.is_achieved());
        assert!(goal(50000, 50000).is_achieved());
        assert_eq!(goal(100, 300).progress_percent(), 100.0);
    }

    #[test]
    fn test_days_left() {
        let g = goal(1, 0);
        assert_eq!(g.days_left(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()), 10);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(GoalCategory::parse("Travel"), Some(GoalCategory::Travel));
        assert_eq!(GoalCategory::parse("pets"), None);
    }

    #[test]
    fn test_validation() {
        assert!(goal(1, 0).validate().is_ok());
        assert_eq!(goal(0, 0).validate(), Err(GoalValidationError::NonPositiveTarget));
    }
}
