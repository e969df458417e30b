//! Wallet table (`wallets.json`)

use std::cmp::Ordering;

use crate::audit::EntityType;
use crate::error::PesoError;
use crate::models::{Wallet, WalletId};

use super::repository::{Record, Repository};

pub type WalletRepository = Repository<Wallet>;

impl Record for Wallet {
    type Id = WalletId;
    const ENTITY: EntityType = EntityType::Wallet;

    fn id(&self) -> WalletId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }

    /// Cash wallets first, then in creation order
    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.wallet_type
            .is_cash()
            .cmp(&a.wallet_type.is_cash())
            .then(a.created_at.cmp(&b.created_at))
            .then(a.name.cmp(&b.name))
    }
}

impl Repository<Wallet> {
    /// Get a wallet by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Wallet>, PesoError> {
        let name = name.trim().to_lowercase();
        Ok(self
            .read()?
            .values()
            .find(|w| w.name.trim().to_lowercase() == name)
            .cloned())
    }

    /// Check whether a wallet name is already taken
    pub fn name_exists(&self, name: &str, exclude: Option<WalletId>) -> Result<bool, PesoError> {
        Ok(self
            .get_by_name(name)?
            .map_or(false, |w| Some(w.id) != exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WalletType;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, WalletRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = WalletRepository::new(temp_dir.path().join("wallets.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_cash_listed_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Wallet::new("BPI Savings", WalletType::Bpi)).unwrap();
        repo.upsert(Wallet::new("GCash", WalletType::GCash)).unwrap();
        repo.upsert(Wallet::new("Pocket", WalletType::Cash)).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|w| w.name).collect();
        assert_eq!(names[0], "Pocket");
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_get_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Wallet::new("My GCash", WalletType::GCash)).unwrap();

        assert!(repo.get_by_name("my gcash").unwrap().is_some());
        assert!(repo.get_by_name("maya").unwrap().is_none());
    }

    #[test]
    fn test_name_exists() {
        let (_temp_dir, repo) = create_test_repo();
        let wallet = Wallet::new("Maya", WalletType::Maya);
        let id = wallet.id;
        repo.upsert(wallet).unwrap();

        assert!(repo.name_exists("MAYA", None).unwrap());
        assert!(!repo.name_exists("maya", Some(id)).unwrap());
        assert!(!repo.name_exists("Tonik", None).unwrap());
    }
}
