//! Transaction service
//!
//! Recording a transaction is the one place where several tables change
//! together: the transaction row, the wallet balance, the matching budget's
//! spent total and, when a budget threshold is crossed, a notification.

use chrono::NaiveDate;

use crate::error::{PesoError, PesoResult};
use crate::models::budget::DEFAULT_WARNING_PERCENT;
use crate::models::{
    AppNotification, BudgetCategory, BudgetThreshold, Money, Transaction, TransactionId,
    TransactionType, Wallet, WalletId,
};
use crate::storage::{Storage, Table};

use super::notification::budget_threshold_notification;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    warning_percent: u8,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub wallet_id: Option<WalletId>,
    pub transaction_type: Option<TransactionType>,
    /// Matched case-insensitively
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Prefix of the ISO date, e.g. "2025-03" or "2025-03-14"
    pub date_prefix: Option<String>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet(mut self, wallet_id: WalletId) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }

    pub fn kind(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Only transactions on a single day
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date_prefix = Some(date.format("%Y-%m-%d").to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        if self.wallet_id.is_some_and(|id| txn.wallet_id != id) {
            return false;
        }
        if self.transaction_type.is_some_and(|t| txn.transaction_type != t) {
            return false;
        }
        if let Some(category) = &self.category {
            if !txn.in_category(category) {
                return false;
            }
        }
        if self.start_date.is_some_and(|start| txn.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| txn.date > end) {
            return false;
        }
        if let Some(prefix) = &self.date_prefix {
            if !txn.date.format("%Y-%m-%d").to_string().starts_with(prefix.as_str()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !txn.description.to_lowercase().contains(&needle)
                && !txn.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Input for recording a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub wallet_id: WalletId,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    pub amount: Money,
    pub category: String,
    pub description: String,
}

/// Everything that changed when a transaction was recorded
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub transaction: Transaction,
    /// Wallet after the balance change
    pub wallet: Wallet,
    /// Budget after the spent change, when an expense matched one
    pub budget: Option<BudgetCategory>,
    pub threshold: Option<BudgetThreshold>,
    pub notification: Option<AppNotification>,
}

/// A recorded transaction applied in memory but not yet flushed
pub(crate) struct StagedRecord {
    outcome: RecordOutcome,
    wallet_before: Wallet,
    budget_before: Option<BudgetCategory>,
}

impl StagedRecord {
    pub(crate) fn outcome(&self) -> &RecordOutcome {
        &self.outcome
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            warning_percent: DEFAULT_WARNING_PERCENT,
        }
    }

    /// Use a warning threshold other than the default 80%
    pub fn with_warning_percent(mut self, warning_percent: u8) -> Self {
        self.warning_percent = warning_percent;
        self
    }

    /// Record a transaction and apply its side effects
    pub fn record(&self, input: NewTransaction) -> PesoResult<RecordOutcome> {
        let staged = self.stage(input)?;
        self.commit(staged, &[])
    }

    /// Validate and apply a transaction to the in-memory tables
    ///
    /// Nothing is written to disk until `commit`. All checks happen before
    /// the first table is touched.
    pub(crate) fn stage(&self, input: NewTransaction) -> PesoResult<StagedRecord> {
        let mut txn = Transaction::new(
            input.wallet_id,
            input.date,
            input.transaction_type,
            input.amount,
            input.category,
            input.description,
        );
        txn.normalize();
        txn.validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        let wallet_before = self
            .storage
            .wallets
            .get(txn.wallet_id)?
            .ok_or_else(|| PesoError::wallet_not_found(txn.wallet_id.to_string()))?;

        let budget_before = if txn.is_expense() {
            self.storage.budgets.get_by_category(&txn.category)?
        } else {
            None
        };

        let mut wallet = wallet_before.clone();
        wallet.apply(txn.signed_amount());

        let mut threshold = None;
        let budget = budget_before.clone().map(|mut budget| {
            threshold = budget.add_spent(txn.amount, self.warning_percent);
            budget
        });

        let notification = match (&budget, threshold) {
            (Some(budget), Some(threshold)) => Some(budget_threshold_notification(
                budget,
                threshold,
                self.warning_percent,
            )),
            _ => None,
        };

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.wallets.upsert(wallet.clone())?;
        if let Some(budget) = &budget {
            self.storage.budgets.upsert(budget.clone())?;
        }
        if let Some(notification) = &notification {
            self.storage.notifications.upsert(notification.clone())?;
        }

        Ok(StagedRecord {
            outcome: RecordOutcome {
                transaction: txn,
                wallet,
                budget,
                threshold,
                notification,
            },
            wallet_before,
            budget_before,
        })
    }

    /// Flush a staged transaction (plus any extra tables) and audit it
    pub(crate) fn commit(&self, staged: StagedRecord, extra: &[Table]) -> PesoResult<RecordOutcome> {
        let mut tables = vec![
            Table::Transactions,
            Table::Wallets,
            Table::Budgets,
            Table::Notifications,
        ];
        tables.extend_from_slice(extra);
        self.storage.flush(&tables)?;

        let StagedRecord {
            outcome,
            wallet_before,
            budget_before,
        } = staged;

        self.storage.log_create(&outcome.transaction)?;
        self.storage.log_update(&wallet_before, &outcome.wallet)?;
        if let (Some(before), Some(after)) = (&budget_before, &outcome.budget) {
            self.storage.log_update(before, after)?;
        }
        if let Some(notification) = &outcome.notification {
            self.storage.log_create(notification)?;
        }

        tracing::info!(
            id = %outcome.transaction.id,
            wallet = %outcome.wallet.name,
            kind = outcome.transaction.transaction_type.as_str(),
            amount = outcome.transaction.amount.cents(),
            "recorded transaction"
        );
        if let (Some(budget), Some(threshold)) = (&outcome.budget, outcome.threshold) {
            tracing::warn!(
                category = %budget.category,
                ?threshold,
                usage = budget.usage_percent(),
                "budget threshold crossed"
            );
        }

        Ok(outcome)
    }

    pub fn get(&self, id: TransactionId) -> PesoResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full UUID or display id
    pub fn find(&self, reference: &str) -> PesoResult<Option<Transaction>> {
        self.storage.transactions.find_by_reference(reference)
    }

    /// Transactions matching a filter, newest first
    pub fn list(&self, filter: &TransactionFilter) -> PesoResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.filter(|t| filter.matches(t))?;
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// The most recent transactions
    pub fn recent(&self, count: usize) -> PesoResult<Vec<Transaction>> {
        self.list(&TransactionFilter::new().limit(count))
    }

    /// Delete a transaction, reversing its wallet and budget effects
    pub fn delete(&self, id: TransactionId) -> PesoResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| PesoError::transaction_not_found(id.to_string()))?;

        let wallet_change = self.storage.wallets.get(txn.wallet_id)?.map(|before| {
            let mut after = before.clone();
            after.apply(-txn.signed_amount());
            (before, after)
        });
        let budget_change = self.reversed_budget(&txn)?;

        self.storage.transactions.delete(id)?;
        if let Some((_, after)) = &wallet_change {
            self.storage.wallets.upsert(after.clone())?;
        }
        if let Some((_, after)) = &budget_change {
            self.storage.budgets.upsert(after.clone())?;
        }

        self.storage
            .flush(&[Table::Transactions, Table::Wallets, Table::Budgets])?;

        self.storage.log_delete(&txn)?;
        if let Some((before, after)) = &wallet_change {
            self.storage.log_update(before, after)?;
        }
        if let Some((before, after)) = &budget_change {
            self.storage.log_update(before, after)?;
        }

        tracing::info!(id = %txn.id, "deleted transaction");
        Ok(txn)
    }

    /// Budget before/after removing an expense's amount from its spent total
    pub(crate) fn reversed_budget(
        &self,
        txn: &Transaction,
    ) -> PesoResult<Option<(BudgetCategory, BudgetCategory)>> {
        if !txn.is_expense() {
            return Ok(None);
        }
        Ok(self
            .storage
            .budgets
            .get_by_category(&txn.category)?
            .map(|before| {
                let mut after = before.clone();
                after.remove_spent(txn.amount);
                (before, after)
            }))
    }
}
