//! Investment service

use crate::error::{PesoError, PesoResult};
use crate::models::{Investment, InvestmentId, InvestmentType, Money};
use crate::storage::{Storage, Table};

/// Service for investment management
pub struct InvestmentService<'a> {
    storage: &'a Storage,
}

/// Input for creating an investment
#[derive(Debug, Clone)]
pub struct NewInvestment {
    pub name: String,
    pub investment_type: InvestmentType,
    pub invested_amount: Money,
    pub current_value: Money,
    pub symbol: Option<String>,
    pub color: Option<String>,
}

/// Fields to change on an existing investment; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct InvestmentUpdate {
    pub name: Option<String>,
    pub investment_type: Option<InvestmentType>,
    pub invested_amount: Option<Money>,
    pub current_value: Option<Money>,
    /// A blank symbol clears it
    pub symbol: Option<String>,
    pub color: Option<String>,
}

/// Totals across every investment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portfolio {
    pub invested: Money,
    pub current_value: Money,
    pub gain: Money,
    /// None when nothing has been invested
    pub return_percent: Option<f64>,
}

impl<'a> InvestmentService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: NewInvestment) -> PesoResult<Investment> {
        let mut investment = Investment::new(
            input.name.trim(),
            input.investment_type,
            input.invested_amount,
            input.current_value,
        );
        investment.symbol = input
            .symbol
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());
        if let Some(color) = input.color.filter(|c| !c.trim().is_empty()) {
            investment.color = color.trim().to_string();
        }
        investment
            .validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.investments.upsert(investment.clone())?;
        self.storage.flush(&[Table::Investments])?;
        self.storage.log_create(&investment)?;

        tracing::info!(id = %investment.id, name = %investment.name, "created investment");
        Ok(investment)
    }

    pub fn update(&self, id: InvestmentId, update: InvestmentUpdate) -> PesoResult<Investment> {
        let before = self.require(id)?;
        let mut investment = before.clone();

        if let Some(name) = update.name {
            investment.name = name.trim().to_string();
        }
        if let Some(kind) = update.investment_type {
            investment.investment_type = kind;
        }
        if let Some(invested) = update.invested_amount {
            investment.invested_amount = invested;
        }
        if let Some(value) = update.current_value {
            investment.current_value = value;
        }
        if let Some(symbol) = update.symbol {
            let symbol = symbol.trim().to_uppercase();
            investment.symbol = (!symbol.is_empty()).then_some(symbol);
        }
        if let Some(color) = update.color.filter(|c| !c.trim().is_empty()) {
            investment.color = color.trim().to_string();
        }
        investment
            .validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.investments.upsert(investment.clone())?;
        self.storage.flush(&[Table::Investments])?;
        self.storage.log_update(&before, &investment)?;

        tracing::info!(id = %investment.id, "updated investment");
        Ok(investment)
    }

    pub fn delete(&self, id: InvestmentId) -> PesoResult<Investment> {
        let investment = self
            .storage
            .investments
            .delete(id)?
            .ok_or_else(|| PesoError::investment_not_found(id.to_string()))?;
        self.storage.flush(&[Table::Investments])?;
        self.storage.log_delete(&investment)?;

        tracing::info!(id = %investment.id, "deleted investment");
        Ok(investment)
    }

    pub fn get(&self, id: InvestmentId) -> PesoResult<Option<Investment>> {
        self.storage.investments.get(id)
    }

    /// Find an investment by name or ticker symbol, then by id
    pub fn find(&self, identifier: &str) -> PesoResult<Option<Investment>> {
        let needle = identifier.trim().to_lowercase();
        let mut by_name = self.storage.investments.filter(|i| {
            i.name.to_lowercase() == needle
                || i.symbol.as_deref().map(str::to_lowercase).as_deref() == Some(needle.as_str())
        })?;
        if by_name.len() == 1 {
            return Ok(by_name.pop());
        }
        self.storage.investments.find_by_reference(identifier)
    }

    pub fn resolve(&self, identifier: &str) -> PesoResult<Investment> {
        self.find(identifier)?
            .ok_or_else(|| PesoError::investment_not_found(identifier))
    }

    pub fn list(&self) -> PesoResult<Vec<Investment>> {
        self.storage.investments.get_all()
    }

    pub fn portfolio(&self) -> PesoResult<Portfolio> {
        let investments = self.list()?;
        let invested: Money = investments.iter().map(|i| i.invested_amount).sum();
        let current_value: Money = investments.iter().map(|i| i.current_value).sum();
        let gain = current_value - invested;
        Ok(Portfolio {
            invested,
            current_value,
            gain,
            return_percent: gain.ratio_of(invested).map(|r| r * 100.0),
        })
    }

    fn require(&self, id: InvestmentId) -> PesoResult<Investment> {
        self.storage
            .investments
            .get(id)?
            .ok_or_else(|| PesoError::investment_not_found(id.to_string()))
    }
}
