//! Generic JSON table repository
//!
//! Every table is held in memory as a map keyed by id and persisted as a
//! JSON array in its own file. Table-specific queries live next to each
//! `Record` implementation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::audit::EntityType;
use crate::error::PesoError;
use crate::models::EntityId;

use super::file_io::{read_json, write_json_atomic};

/// A row that can be stored in a `Repository`
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: EntityId;

    /// Audit entity type, also used in error messages
    const ENTITY: EntityType;

    fn id(&self) -> Self::Id;

    /// Name shown in audit entries
    fn label(&self) -> Option<String> {
        None
    }

    /// Order used by `get_all` and when writing the file
    fn list_order(a: &Self, b: &Self) -> Ordering;
}

/// In-memory table backed by a JSON file
pub struct Repository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<T::Id, T>>, PesoError> {
        self.data
            .read()
            .map_err(|e| PesoError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<T::Id, T>>, PesoError> {
        self.data
            .write()
            .map_err(|e| PesoError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory table with the file contents
    pub fn load(&self) -> Result<(), PesoError> {
        let rows: Vec<T> = read_json(&self.path)?;
        let count = rows.len();

        let mut data = self.write()?;
        data.clear();
        for row in rows {
            data.insert(row.id(), row);
        }

        tracing::debug!(table = %T::ENTITY, rows = count, "loaded table");
        Ok(())
    }

    /// Write the in-memory table to its file
    pub fn save(&self) -> Result<(), PesoError> {
        let rows = self.get_all()?;
        write_json_atomic(&self.path, &rows)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, PesoError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All rows in list order
    pub fn get_all(&self) -> Result<Vec<T>, PesoError> {
        let mut rows: Vec<T> = self.read()?.values().cloned().collect();
        rows.sort_by(T::list_order);
        Ok(rows)
    }

    /// Rows matching a predicate, in list order
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<T>, PesoError>
    where
        F: Fn(&T) -> bool,
    {
        let mut rows: Vec<T> = self
            .read()?
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect();
        rows.sort_by(T::list_order);
        Ok(rows)
    }

    /// Find a row by full UUID, display id or id prefix
    ///
    /// An ambiguous prefix matches nothing.
    pub fn find_by_reference(&self, reference: &str) -> Result<Option<T>, PesoError> {
        let data = self.read()?;
        let mut matches = data
            .values()
            .filter(|row| row.id().matches_reference(reference));

        match (matches.next(), matches.next()) {
            (Some(row), None) => Ok(Some(row.clone())),
            _ => Ok(None),
        }
    }

    /// Insert or update a row
    pub fn upsert(&self, row: T) -> Result<(), PesoError> {
        self.write()?.insert(row.id(), row);
        Ok(())
    }

    /// Remove a row, returning it if it existed
    pub fn delete(&self, id: T::Id) -> Result<Option<T>, PesoError> {
        Ok(self.write()?.remove(&id))
    }

    /// Remove every row matching a predicate, returning the removed rows
    pub fn delete_where<F>(&self, predicate: F) -> Result<Vec<T>, PesoError>
    where
        F: Fn(&T) -> bool,
    {
        let mut data = self.write()?;
        let ids: Vec<T::Id> = data
            .values()
            .filter(|row| predicate(row))
            .map(T::id)
            .collect();
        Ok(ids.into_iter().filter_map(|id| data.remove(&id)).collect())
    }

    /// Replace the whole table (used by import)
    pub fn replace_all(&self, rows: Vec<T>) -> Result<(), PesoError> {
        let mut data = self.write()?;
        data.clear();
        for row in rows {
            data.insert(row.id(), row);
        }
        Ok(())
    }

    pub fn exists(&self, id: T::Id) -> Result<bool, PesoError> {
        Ok(self.read()?.contains_key(&id))
    }

    pub fn count(&self) -> Result<usize, PesoError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bill, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Repository<Bill>) {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::new(temp_dir.path().join("bills.json"));
        (temp_dir, repo)
    }

    fn bill(name: &str, day: u32) -> Bill {
        Bill::new(
            name,
            Money::from_cents(1000),
            NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
            "Utilities",
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let water = bill("Water", 12);
        let id = water.id;
        repo.upsert(water).unwrap();
        repo.save().unwrap();

        let reopened: Repository<Bill> = Repository::new(temp_dir.path().join("bills.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.get(id).unwrap().unwrap().name, "Water");
    }

    #[test]
    fn test_file_is_a_json_array() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(bill("Rent", 1)).unwrap();
        repo.save().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert_eq!(raw.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_find_by_reference() {
        let (_temp_dir, repo) = create_test_repo();
        let rent = bill("Rent", 1);
        let id = rent.id;
        repo.upsert(rent).unwrap();

        let found = repo.find_by_reference(&id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert!(repo.find_by_reference("bill-zzzzzzzz").unwrap().is_none());
    }

    #[test]
    fn test_delete_and_delete_where() {
        let (_temp_dir, repo) = create_test_repo();
        let a = bill("A", 1);
        let a_id = a.id;
        repo.upsert(a).unwrap();
        repo.upsert(bill("B", 2)).unwrap();
        repo.upsert(bill("C", 3)).unwrap();

        assert!(repo.delete(a_id).unwrap().is_some());
        assert!(repo.delete(a_id).unwrap().is_none());

        let removed = repo.delete_where(|b| b.name == "B").unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_replace_all() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(bill("Old", 1)).unwrap();
        repo.replace_all(vec![bill("New 1", 2), bill("New 2", 3)]).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["New 1", "New 2"]);
    }
}
