//! Investment model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::InvestmentId;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    Stock,
    Crypto,
    Bond,
    RealEstate,
    Fund,
    #[default]
    Other,
}

impl InvestmentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "stock" | "stocks" => Some(Self::Stock),
            "crypto" => Some(Self::Crypto),
            "bond" | "bonds" => Some(Self::Bond),
            "real_estate" | "realestate" => Some(Self::RealEstate),
            "fund" | "funds" => Some(Self::Fund),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stock => write!(f, "Stock"),
            Self::Crypto => write!(f, "Crypto"),
            Self::Bond => write!(f, "Bond"),
            Self::RealEstate => write!(f, "Real Estate"),
            Self::Fund => write!(f, "Fund"),
            Self::Other => write!(f, "Other"),
        }
    }
}

pub const DEFAULT_INVESTMENT_COLOR: &str = "#f59e0b";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: InvestmentId,

    pub name: String,

    #[serde(rename = "type")]
    pub investment_type: InvestmentType,

    pub invested_amount: Money,

    pub current_value: Money,

    /// Ticker symbol, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    pub color: String,
}

impl Investment {
    pub fn new(
        name: impl Into<String>,
        investment_type: InvestmentType,
        invested_amount: Money,
        current_value: Money,
    ) -> Self {
        Self {
            id: InvestmentId::new(),
            name: name.into(),
            investment_type,
            invested_amount,
            current_value,
            symbol: None,
            color: DEFAULT_INVESTMENT_COLOR.to_string(),
        }
    }

    /// Unrealized gain (negative for a loss)
    pub fn gain(&self) -> Money {
        self.current_value - self.invested_amount
    }

    /// Gain relative to the invested amount, in percent
    pub fn return_percent(&self) -> Option<f64> {
        self.gain()
            .ratio_of(self.invested_amount)
            .map(|ratio| ratio * 100.0)
    }

    pub fn validate(&self) -> Result<(), InvestmentValidationError> {
        if self.name.trim().is_empty() {
            return Err(InvestmentValidationError::EmptyName);
        }
        if self.invested_amount.is_negative() || self.current_value.is_negative() {
            return Err(InvestmentValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Investment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.investment_type, self.current_value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvestmentValidationError {
    EmptyName,
    NegativeAmount,
}

impl fmt::Display for InvestmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Investment name cannot be empty"),
            Self::NegativeAmount => write!(f, "Investment amounts cannot be negative"),
        }
    }
}

impl std::error::Error for InvestmentValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_and_return() {
        let inv = Investment::new(
            "JFC",
            InvestmentType::Stock,
            Money::from_cents(100000),
            Money::from_cents(125000),
        );
        assert_eq!(inv.gain().cents(), 25000);
        assert_eq!(inv.return_percent(), Some(25.0));
    }

    #[test]
    fn test_loss() {
        let inv = Investment::new(
            "BTC",
            InvestmentType::Crypto,
            Money::from_cents(100000),
            Money::from_cents(80000),
        );
        assert_eq!(inv.gain().cents(), -20000);
        assert_eq!(inv.return_percent(), Some(-20.0));
    }

    #[test]
    fn test_zero_invested_has_no_return() {
        let inv = Investment::new("Gift", InvestmentType::Other, Money::zero(), Money::from_cents(5));
        assert_eq!(inv.return_percent(), None);
    }

    #[test]
    fn test_type_parse_and_serialize() {
        assert_eq!(InvestmentType::parse("real estate"), Some(InvestmentType::RealEstate));
        assert_eq!(InvestmentType::parse("FUND"), Some(InvestmentType::Fund));
        assert_eq!(
            serde_json::to_string(&InvestmentType::RealEstate).unwrap(),
            "\"real_estate\""
        );
    }
}
