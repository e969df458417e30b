//! Budget table (`budgets.json`)

use std::cmp::Ordering;

use crate::audit::EntityType;
use crate::error::PesoError;
use crate::models::{BudgetCategory, BudgetId};

use super::repository::{Record, Repository};

pub type BudgetRepository = Repository<BudgetCategory>;

impl Record for BudgetCategory {
    type Id = BudgetId;
    const ENTITY: EntityType = EntityType::Budget;

    fn id(&self) -> BudgetId {
        self.id
    }

    fn label(&self) -> Option<String> {
        Some(self.category.clone())
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.category.to_lowercase().cmp(&b.category.to_lowercase())
    }
}

impl Repository<BudgetCategory> {
    /// Budget covering a category, matched case-insensitively
    pub fn get_by_category(&self, category: &str) -> Result<Option<BudgetCategory>, PesoError> {
        Ok(self
            .read()?
            .values()
            .find(|b| b.matches_category(category))
            .cloned())
    }

    pub fn category_exists(
        &self,
        category: &str,
        exclude: Option<BudgetId>,
    ) -> Result<bool, PesoError> {
        Ok(self
            .get_by_category(category)?
            .map_or(false, |b| Some(b.id) != exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_category_lookup_ignores_case() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        let food = BudgetCategory::new("Food", Money::from_cents(500000));
        let id = food.id;
        repo.upsert(food).unwrap();
        repo.upsert(BudgetCategory::new("bills", Money::from_cents(1))).unwrap();

        assert_eq!(repo.get_by_category("FOOD").unwrap().unwrap().id, id);
        assert!(repo.get_by_category("Fun").unwrap().is_none());
        assert!(repo.category_exists("food", None).unwrap());
        assert!(!repo.category_exists("food", Some(id)).unwrap());

        let order: Vec<_> = repo.get_all().unwrap().into_iter().map(|b| b.category).collect();
        assert_eq!(order, vec!["bills", "Food"]);
    }
}
