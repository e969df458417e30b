//! Budget service
//!
//! Budgets are per-category spending caps. Their spent totals move with
//! expense transactions; `recalculate` rebuilds them from a month's
//! transactions and `reset` zeroes them for a new month.

use chrono::NaiveDate;

use crate::error::{PesoError, PesoResult};
use crate::models::budget::DEFAULT_WARNING_PERCENT;
use crate::models::{BudgetCategory, BudgetId, Money, Month, TransactionType, WalletId};
use crate::storage::{Storage, Table};

use super::transaction::{NewTransaction, RecordOutcome, TransactionService};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    warning_percent: u8,
}

/// Fields to change on an existing budget; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub limit: Option<Money>,
    pub spent: Option<Money>,
    pub color: Option<String>,
}

/// Budget usage for display
#[derive(Debug, Clone)]
pub struct BudgetUsage {
    pub budget: BudgetCategory,
    pub remaining: Money,
    /// Spent over limit, uncapped
    pub percent: f64,
    /// Capped at 100 for progress bars
    pub bar_percent: f64,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            warning_percent: DEFAULT_WARNING_PERCENT,
        }
    }

    pub fn with_warning_percent(mut self, warning_percent: u8) -> Self {
        self.warning_percent = warning_percent;
        self
    }

    pub fn create(
        &self,
        category: &str,
        limit: Money,
        color: Option<String>,
    ) -> PesoResult<BudgetCategory> {
        let category = category.trim();
        if self.storage.budgets.category_exists(category, None)? {
            return Err(PesoError::Duplicate {
                entity_type: "Budget",
                identifier: category.to_string(),
            });
        }

        let mut budget = BudgetCategory::new(category, limit);
        if let Some(color) = color.filter(|c| !c.trim().is_empty()) {
            budget.color = color.trim().to_string();
        }
        budget
            .validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.flush(&[Table::Budgets])?;
        self.storage.log_create(&budget)?;

        tracing::info!(id = %budget.id, category = %budget.category, "created budget");
        Ok(budget)
    }

    pub fn update(&self, id: BudgetId, update: BudgetUpdate) -> PesoResult<BudgetCategory> {
        let before = self.require(id)?;
        let mut budget = before.clone();

        if let Some(category) = update.category {
            let category = category.trim().to_string();
            if self.storage.budgets.category_exists(&category, Some(id))? {
                return Err(PesoError::Duplicate {
                    entity_type: "Budget",
                    identifier: category,
                });
            }
            budget.category = category;
        }
        if let Some(limit) = update.limit {
            budget.limit = limit;
        }
        if let Some(spent) = update.spent {
            budget.spent = spent;
        }
        if let Some(color) = update.color.filter(|c| !c.trim().is_empty()) {
            budget.color = color.trim().to_string();
        }

        budget
            .validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.flush(&[Table::Budgets])?;
        self.storage.log_update(&before, &budget)?;

        tracing::info!(id = %budget.id, "updated budget");
        Ok(budget)
    }

    pub fn delete(&self, id: BudgetId) -> PesoResult<BudgetCategory> {
        let budget = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| PesoError::budget_not_found(id.to_string()))?;
        self.storage.flush(&[Table::Budgets])?;
        self.storage.log_delete(&budget)?;

        tracing::info!(id = %budget.id, "deleted budget");
        Ok(budget)
    }

    pub fn get(&self, id: BudgetId) -> PesoResult<Option<BudgetCategory>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by category name, then by id
    pub fn find(&self, identifier: &str) -> PesoResult<Option<BudgetCategory>> {
        if let Some(budget) = self.storage.budgets.get_by_category(identifier)? {
            return Ok(Some(budget));
        }
        self.storage.budgets.find_by_reference(identifier)
    }

    pub fn resolve(&self, identifier: &str) -> PesoResult<BudgetCategory> {
        self.find(identifier)?
            .ok_or_else(|| PesoError::budget_not_found(identifier))
    }

    pub fn list(&self) -> PesoResult<Vec<BudgetCategory>> {
        self.storage.budgets.get_all()
    }

    /// Every budget with its usage figures
    pub fn usage(&self) -> PesoResult<Vec<BudgetUsage>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|budget| BudgetUsage {
                remaining: budget.remaining(),
                percent: budget.usage_percent(),
                bar_percent: budget.bar_percent(),
                budget,
            })
            .collect())
    }

    /// Record an expense against a budget's category
    pub fn spend(
        &self,
        id: BudgetId,
        amount: Money,
        wallet_id: WalletId,
        date: NaiveDate,
    ) -> PesoResult<RecordOutcome> {
        let budget = self.require(id)?;
        TransactionService::new(self.storage)
            .with_warning_percent(self.warning_percent)
            .record(NewTransaction {
                wallet_id,
                date,
                transaction_type: TransactionType::Expense,
                amount,
                category: budget.category.clone(),
                description: format!("Spending: {}", budget.category),
            })
    }

    /// Set every budget's spent to that month's expenses in its category
    pub fn recalculate(&self, month: Month) -> PesoResult<Vec<BudgetCategory>> {
        let range = month.range();
        let expenses = self
            .storage
            .transactions
            .get_by_date_range(range.start, range.end)?
            .into_iter()
            .filter(|t| t.is_expense())
            .collect::<Vec<_>>();

        let budgets = self.rewrite_spent(|budget| {
            expenses
                .iter()
                .filter(|t| budget.matches_category(&t.category))
                .map(|t| t.amount)
                .sum()
        })?;

        tracing::info!(%month, "recalculated budgets");
        Ok(budgets)
    }

    /// Zero every budget's spent total
    pub fn reset(&self) -> PesoResult<Vec<BudgetCategory>> {
        let budgets = self.rewrite_spent(|_| Money::zero())?;
        tracing::info!("reset budgets");
        Ok(budgets)
    }

    fn rewrite_spent<F>(&self, spent_for: F) -> PesoResult<Vec<BudgetCategory>>
    where
        F: Fn(&BudgetCategory) -> Money,
    {
        let mut changes = Vec::new();
        for before in self.list()? {
            let spent = spent_for(&before);
            if spent == before.spent {
                continue;
            }
            let mut after = before.clone();
            after.spent = spent;
            self.storage.budgets.upsert(after.clone())?;
            changes.push((before, after));
        }

        if !changes.is_empty() {
            self.storage.flush(&[Table::Budgets])?;
            for (before, after) in &changes {
                self.storage.log_update(before, after)?;
            }
        }

        self.list()
    }

    fn require(&self, id: BudgetId) -> PesoResult<BudgetCategory> {
        self.storage
            .budgets
            .get(id)?
            .ok_or_else(|| PesoError::budget_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PesoPaths;
    use crate::models::{NotificationKind, Wallet, WalletType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_wallet(storage: &Storage) -> WalletId {
        let wallet = Wallet::with_balance("Cash", WalletType::Cash, Money::from_cents(1_000_000));
        let id = wallet.id;
        storage.wallets.upsert(wallet).unwrap();
        id
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_create_validates() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.create("Food", Money::from_cents(500000), None).unwrap();
        let dup = service.create("FOOD", Money::from_cents(1), None).unwrap_err();
        assert!(matches!(dup, PesoError::Duplicate { .. }));

        assert!(service
            .create("Transport", Money::zero(), None)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_update_and_find() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let budget = service.create("Food", Money::from_cents(1000), None).unwrap();

        service
            .update(
                budget.id,
                BudgetUpdate {
                    category: Some("Groceries".into()),
                    limit: Some(Money::from_cents(2000)),
                    ..Default::default()
                },
            )
            .unwrap();

        let found = service.find("groceries").unwrap().unwrap();
        assert_eq!(found.limit.cents(), 2000);
        assert!(service.find("Food").unwrap().is_none());
    }

    #[test]
    fn test_spend_records_expense_and_warns() {
        let (_temp, storage) = create_test_storage();
        let wallet_id = add_wallet(&storage);
        let service = BudgetService::new(&storage);
        let budget = service.create("Food", Money::from_cents(10000), None).unwrap();

        let outcome = service
            .spend(budget.id, Money::from_cents(8500), wallet_id, date(3, 2))
            .unwrap();

        assert_eq!(outcome.transaction.description, "Spending: Food");
        assert_eq!(outcome.transaction.category, "Food");
        assert_eq!(outcome.budget.unwrap().spent.cents(), 8500);
        assert_eq!(outcome.notification.unwrap().kind, NotificationKind::Warning);
    }

    #[test]
    fn test_custom_warning_percent() {
        let (_temp, storage) = create_test_storage();
        let wallet_id = add_wallet(&storage);
        let service = BudgetService::new(&storage).with_warning_percent(50);
        let budget = service.create("Food", Money::from_cents(10000), None).unwrap();

        let outcome = service
            .spend(budget.id, Money::from_cents(5000), wallet_id, date(3, 2))
            .unwrap();
        assert_eq!(
            outcome.notification.unwrap().message,
            "You have used 50% of your Food budget."
        );
    }

    #[test]
    fn test_recalculate_uses_only_that_month() {
        let (_temp, storage) = create_test_storage();
        let wallet_id = add_wallet(&storage);
        let service = BudgetService::new(&storage);
        let budget = service.create("Food", Money::from_cents(100000), None).unwrap();

        service
            .spend(budget.id, Money::from_cents(1000), wallet_id, date(2, 27))
            .unwrap();
        service
            .spend(budget.id, Money::from_cents(2000), wallet_id, date(3, 1))
            .unwrap();
        service
            .spend(budget.id, Money::from_cents(3000), wallet_id, date(3, 31))
            .unwrap();

        let budgets = service.recalculate(Month::new(2025, 3).unwrap()).unwrap();
        assert_eq!(budgets[0].spent.cents(), 5000);
    }

    #[test]
    fn test_reset_zeroes_spent() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let budget = service.create("Food", Money::from_cents(1000), None).unwrap();
        service
            .update(
                budget.id,
                BudgetUpdate {
                    spent: Some(Money::from_cents(700)),
                    ..Default::default()
                },
            )
            .unwrap();

        let budgets = service.reset().unwrap();
        assert!(budgets.iter().all(|b| b.spent.is_zero()));
    }

    #[test]
    fn test_usage_caps_bar() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let budget = service.create("Fun", Money::from_cents(1000), None).unwrap();
        service
            .update(
                budget.id,
                BudgetUpdate {
                    spent: Some(Money::from_cents(1500)),
                    ..Default::default()
                },
            )
            .unwrap();

        let usage = &service.usage().unwrap()[0];
        assert_eq!(usage.percent, 150.0);
        assert_eq!(usage.bar_percent, 100.0);
        assert_eq!(usage.remaining.cents(), -500);
    }
}
