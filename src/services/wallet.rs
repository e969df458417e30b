//! Wallet service
//!
//! Wallet CRUD plus balance verification. A wallet's balance always equals
//! its opening balance plus the signed sum of its transactions; `verify`
//! reports wallets where that no longer holds and `repair` fixes them.

use std::collections::HashMap;

use crate::error::{PesoError, PesoResult};
use crate::models::{BudgetCategory, BudgetId, CardDetails, Money, Wallet, WalletId, WalletType};
use crate::storage::{Storage, Table};

/// Service for wallet management
pub struct WalletService<'a> {
    storage: &'a Storage,
}

/// Input for creating a wallet
#[derive(Debug, Clone)]
pub struct NewWallet {
    pub name: String,
    pub wallet_type: WalletType,
    pub balance: Money,
    pub color: Option<String>,
    pub card: CardDetails,
}

impl NewWallet {
    pub fn new(name: impl Into<String>, wallet_type: WalletType) -> Self {
        Self {
            name: name.into(),
            wallet_type,
            balance: Money::zero(),
            color: None,
            card: CardDetails::default(),
        }
    }

    pub fn balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }
}

/// Fields to change on an existing wallet; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct WalletUpdate {
    pub name: Option<String>,
    pub wallet_type: Option<WalletType>,
    pub color: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
}

/// Result of deleting a wallet
#[derive(Debug, Clone)]
pub struct WalletDeletion {
    pub wallet: Wallet,
    /// Transactions removed along with a forced delete
    pub removed_transactions: usize,
}

/// A wallet whose stored balance disagrees with its transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceDrift {
    pub wallet_id: WalletId,
    pub name: String,
    pub stored: Money,
    pub expected: Money,
}

impl BalanceDrift {
    pub fn difference(&self) -> Money {
        self.stored - self.expected
    }
}

/// Blank strings clear an optional field
fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl<'a> WalletService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: NewWallet) -> PesoResult<Wallet> {
        let name = input.name.trim().to_string();
        if self.storage.wallets.name_exists(&name, None)? {
            return Err(PesoError::Duplicate {
                entity_type: "Wallet",
                identifier: name,
            });
        }

        let mut wallet = Wallet::with_balance(name, input.wallet_type, input.balance);
        if let Some(color) = input.color.and_then(optional) {
            wallet.color = color;
        }
        wallet.card = input.card;
        wallet
            .validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.flush(&[Table::Wallets])?;
        self.storage.log_create(&wallet)?;

        tracing::info!(id = %wallet.id, name = %wallet.name, "created wallet");
        Ok(wallet)
    }

    pub fn update(&self, id: WalletId, update: WalletUpdate) -> PesoResult<Wallet> {
        let before = self.require(id)?;
        let mut wallet = before.clone();

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if self.storage.wallets.name_exists(&name, Some(id))? {
                return Err(PesoError::Duplicate {
                    entity_type: "Wallet",
                    identifier: name,
                });
            }
            wallet.name = name;
        }
        if let Some(wallet_type) = update.wallet_type {
            wallet.wallet_type = wallet_type;
        }
        if let Some(color) = update.color.and_then(optional) {
            wallet.color = color;
        }
        if let Some(number) = update.account_number {
            wallet.card.account_number = optional(number);
        }
        if let Some(account_name) = update.account_name {
            wallet.card.account_name = optional(account_name);
        }
        if let Some(expiry) = update.expiry_date {
            wallet.card.expiry_date = optional(expiry);
        }
        if let Some(cvv) = update.cvv {
            wallet.card.cvv = optional(cvv);
        }

        wallet
            .validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;
        wallet.updated_at = chrono::Utc::now();

        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.flush(&[Table::Wallets])?;
        self.storage.log_update(&before, &wallet)?;

        tracing::info!(id = %wallet.id, "updated wallet");
        Ok(wallet)
    }

    /// Manually adjust a wallet's balance
    pub fn set_balance(&self, id: WalletId, balance: Money) -> PesoResult<Wallet> {
        let before = self.require(id)?;
        let mut wallet = before.clone();
        wallet.set_balance(balance);

        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.flush(&[Table::Wallets])?;
        self.storage.log_update(&before, &wallet)?;

        tracing::info!(
            id = %wallet.id,
            from = before.balance.cents(),
            to = wallet.balance.cents(),
            "adjusted wallet balance"
        );
        Ok(wallet)
    }

    /// Delete a wallet
    ///
    /// Refused while transactions reference the wallet unless `force` is
    /// set, in which case those transactions are deleted too and their
    /// expenses are taken back out of the matching budgets.
    pub fn delete(&self, id: WalletId, force: bool) -> PesoResult<WalletDeletion> {
        let wallet = self.require(id)?;
        let txn_count = self.storage.transactions.count_for_wallet(id)?;

        if txn_count > 0 && !force {
            return Err(PesoError::Validation(format!(
                "Wallet '{}' has {} transaction(s). Use --force to delete them as well.",
                wallet.name, txn_count
            )));
        }

        let removed = self.storage.transactions.delete_where(|t| t.wallet_id == id)?;

        let mut budget_before: HashMap<BudgetId, BudgetCategory> = HashMap::new();
        for txn in removed.iter().filter(|t| t.is_expense()) {
            if let Some(mut budget) = self.storage.budgets.get_by_category(&txn.category)? {
                budget_before.entry(budget.id).or_insert_with(|| budget.clone());
                budget.remove_spent(txn.amount);
                self.storage.budgets.upsert(budget)?;
            }
        }

        self.storage.wallets.delete(id)?;
        self.storage
            .flush(&[Table::Wallets, Table::Transactions, Table::Budgets])?;

        self.storage.log_delete(&wallet)?;
        for txn in &removed {
            self.storage.log_delete(txn)?;
        }
        for before in budget_before.values() {
            if let Some(after) = self.storage.budgets.get(before.id)? {
                self.storage.log_update(before, &after)?;
            }
        }

        tracing::info!(
            id = %wallet.id,
            transactions = removed.len(),
            "deleted wallet"
        );
        Ok(WalletDeletion {
            wallet,
            removed_transactions: removed.len(),
        })
    }

    pub fn get(&self, id: WalletId) -> PesoResult<Option<Wallet>> {
        self.storage.wallets.get(id)
    }

    /// Find a wallet by name, then by id
    pub fn find(&self, identifier: &str) -> PesoResult<Option<Wallet>> {
        if let Some(wallet) = self.storage.wallets.get_by_name(identifier)? {
            return Ok(Some(wallet));
        }
        self.storage.wallets.find_by_reference(identifier)
    }

    /// Like `find`, but missing wallets are an error
    pub fn resolve(&self, identifier: &str) -> PesoResult<Wallet> {
        self.find(identifier)?
            .ok_or_else(|| PesoError::wallet_not_found(identifier))
    }

    /// Cash wallets first, then in creation order
    pub fn list(&self) -> PesoResult<Vec<Wallet>> {
        self.storage.wallets.get_all()
    }

    pub fn total_balance(&self) -> PesoResult<Money> {
        Ok(self.list()?.iter().map(|w| w.balance).sum())
    }

    /// Wallets whose balance disagrees with opening balance + transactions
    pub fn verify(&self) -> PesoResult<Vec<BalanceDrift>> {
        let mut sums: HashMap<WalletId, Money> = HashMap::new();
        for txn in self.storage.transactions.get_all()? {
            *sums.entry(txn.wallet_id).or_insert_with(Money::zero) += txn.signed_amount();
        }

        let drifts: Vec<BalanceDrift> = self
            .list()?
            .into_iter()
            .filter_map(|wallet| {
                let expected =
                    wallet.opening_balance + sums.get(&wallet.id).copied().unwrap_or(Money::zero());
                (expected != wallet.balance).then(|| BalanceDrift {
                    wallet_id: wallet.id,
                    name: wallet.name,
                    stored: wallet.balance,
                    expected,
                })
            })
            .collect();

        for drift in &drifts {
            tracing::warn!(
                wallet = %drift.name,
                stored = drift.stored.cents(),
                expected = drift.expected.cents(),
                "wallet balance drift"
            );
        }
        Ok(drifts)
    }

    /// Reset drifted balances to what the transactions say
    pub fn repair(&self) -> PesoResult<Vec<BalanceDrift>> {
        let drifts = self.verify()?;
        if drifts.is_empty() {
            return Ok(drifts);
        }

        let mut changes = Vec::new();
        for drift in &drifts {
            let before = self.require(drift.wallet_id)?;
            let mut after = before.clone();
            after.balance = drift.expected;
            after.updated_at = chrono::Utc::now();
            self.storage.wallets.upsert(after.clone())?;
            changes.push((before, after));
        }

        self.storage.flush(&[Table::Wallets])?;
        for (before, after) in &changes {
            self.storage.log_update(before, after)?;
        }

        tracing::info!(count = drifts.len(), "repaired wallet balances");
        Ok(drifts)
    }

    fn require(&self, id: WalletId) -> PesoResult<Wallet> {
        self.storage
            .wallets
            .get(id)?
            .ok_or_else(|| PesoError::wallet_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PesoPaths;
    use crate::models::TransactionType;
    use crate::services::transaction::{NewTransaction, TransactionService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PesoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn spend(storage: &Storage, wallet_id: WalletId, cents: i64, category: &str) {
        TransactionService::new(storage)
            .record(NewTransaction {
                wallet_id,
                date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                transaction_type: TransactionType::Expense,
                amount: Money::from_cents(cents),
                category: category.into(),
                description: String::new(),
            })
            .unwrap();
    }

    #[test]
    fn test_create_rejects_duplicate_names() {
        let (_temp, storage) = create_test_storage();
        let service = WalletService::new(&storage);

        service.create(NewWallet::new("GCash", WalletType::GCash)).unwrap();
        let err = service
            .create(NewWallet::new("gcash", WalletType::Maya))
            .unwrap_err();
        assert!(matches!(err, PesoError::Duplicate { .. }));

        assert!(service
            .create(NewWallet::new("  ", WalletType::Cash))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_update_card_fields() {
        let (_temp, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let wallet = service.create(NewWallet::new("BPI", WalletType::Bpi)).unwrap();

        let updated = service
            .update(
                wallet.id,
                WalletUpdate {
                    name: Some("BPI Savings".into()),
                    account_number: Some("1234 5678 9012".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "BPI Savings");
        assert_eq!(updated.masked_account_number().unwrap(), "•••• 9012");

        let err = service
            .update(
                wallet.id,
                WalletUpdate {
                    cvv: Some("12a".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let wallet = service.create(NewWallet::new("Maya", WalletType::Maya)).unwrap();

        assert_eq!(service.find("maya").unwrap().unwrap().id, wallet.id);
        assert_eq!(
            service.find(&wallet.id.to_string()).unwrap().unwrap().id,
            wallet.id
        );
        assert!(service.resolve("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_refused_with_transactions() {
        let (_temp, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let wallet = service
            .create(NewWallet::new("Cash", WalletType::Cash).balance(Money::from_cents(5000)))
            .unwrap();
        spend(&storage, wallet.id, 1000, "Food");

        assert!(service.delete(wallet.id, false).unwrap_err().is_validation());
        assert!(storage.wallets.exists(wallet.id).unwrap());
    }

    #[test]
    fn test_forced_delete_cascades_and_restores_budget() {
        let (_temp, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let wallet = service
            .create(NewWallet::new("Cash", WalletType::Cash).balance(Money::from_cents(5000)))
            .unwrap();
        storage
            .budgets
            .upsert(BudgetCategory::new("Food", Money::from_cents(10000)))
            .unwrap();
        spend(&storage, wallet.id, 1000, "Food");
        spend(&storage, wallet.id, 500, "Food");

        let deletion = service.delete(wallet.id, true).unwrap();
        assert_eq!(deletion.removed_transactions, 2);
        assert_eq!(storage.transactions.count().unwrap(), 0);
        let budget = storage.budgets.get_by_category("food").unwrap().unwrap();
        assert_eq!(budget.spent, Money::zero());
    }

    #[test]
    fn test_set_balance_keeps_ledger_consistent() {
        let (_temp, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let wallet = service
            .create(NewWallet::new("GCash", WalletType::GCash).balance(Money::from_cents(10000)))
            .unwrap();
        spend(&storage, wallet.id, 2500, "Food");

        service.set_balance(wallet.id, Money::from_cents(20000)).unwrap();
        assert!(service.verify().unwrap().is_empty());
    }

    #[test]
    fn test_verify_and_repair_drift() {
        let (_temp, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let wallet = service
            .create(NewWallet::new("GCash", WalletType::GCash).balance(Money::from_cents(10000)))
            .unwrap();
        spend(&storage, wallet.id, 2500, "Food");

        let mut tampered = storage.wallets.get(wallet.id).unwrap().unwrap();
        tampered.balance = Money::from_cents(1);
        storage.wallets.upsert(tampered).unwrap();

        let drifts = service.verify().unwrap();
        assert_eq!(drifts.len(), 1);
        assert_eq!(drifts[0].expected.cents(), 7500);

        service.repair().unwrap();
        assert_eq!(storage.wallets.get(wallet.id).unwrap().unwrap().balance.cents(), 7500);
        assert!(service.verify().unwrap().is_empty());
    }

    #[test]
    fn test_total_balance() {
        let (_temp, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        service
            .create(NewWallet::new("A", WalletType::Cash).balance(Money::from_cents(100)))
            .unwrap();
        service
            .create(NewWallet::new("B", WalletType::Bdo).balance(Money::from_cents(250)))
            .unwrap();
        assert_eq!(service.total_balance().unwrap().cents(), 350);
    }
}
