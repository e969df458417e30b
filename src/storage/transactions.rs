//! Transaction table (`transactions.json`)

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::PesoError;
use crate::models::{Transaction, TransactionId, WalletId};

use super::repository::{Record, Repository};

pub type TransactionRepository = Repository<Transaction>;

impl Record for Transaction {
    type Id = TransactionId;
    const ENTITY: EntityType = EntityType::Transaction;

    fn id(&self) -> TransactionId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.description.clone())
    }

    /// Newest first
    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.date
            .cmp(&a.date)
            .then(b.created_at.cmp(&a.created_at))
    }
}

impl Repository<Transaction> {
    /// Transactions for a wallet, newest first
    pub fn get_by_wallet(&self, wallet_id: WalletId) -> Result<Vec<Transaction>, PesoError> {
        self.filter(|t| t.wallet_id == wallet_id)
    }

    /// Transactions dated within `start..=end`, newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, PesoError> {
        self.filter(|t| t.date >= start && t.date <= end)
    }

    /// Number of transactions referencing a wallet
    pub fn count_for_wallet(&self, wallet_id: WalletId) -> Result<usize, PesoError> {
        Ok(self
            .read()?
            .values()
            .filter(|t| t.wallet_id == wallet_id)
            .count())
    }

    /// Distinct categories in first-seen (newest first) order, original casing
    pub fn categories(&self) -> Result<Vec<String>, PesoError> {
        let mut seen: Vec<String> = Vec::new();
        for txn in self.get_all()? {
            if !seen.iter().any(|c| txn.in_category(c)) {
                seen.push(txn.category.clone());
            }
        }
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn txn(wallet: WalletId, day: u32, category: &str) -> Transaction {
        Transaction::new(
            wallet,
            date(day),
            TransactionType::Expense,
            Money::from_cents(100),
            category,
            "test",
        )
    }

    #[test]
    fn test_queries() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        let cash = WalletId::new();
        let gcash = WalletId::new();

        repo.upsert(txn(cash, 5, "Food")).unwrap();
        repo.upsert(txn(cash, 20, "food")).unwrap();
        repo.upsert(txn(gcash, 10, "Transport")).unwrap();

        let cash_txns = repo.get_by_wallet(cash).unwrap();
        assert_eq!(cash_txns.len(), 2);
        assert_eq!(cash_txns[0].date, date(20));
        assert_eq!(repo.count_for_wallet(gcash).unwrap(), 1);

        let range = repo.get_by_date_range(date(5), date(10)).unwrap();
        assert_eq!(range.len(), 2);

        assert_eq!(repo.categories().unwrap(), vec!["food", "Transport"]);
    }
}
