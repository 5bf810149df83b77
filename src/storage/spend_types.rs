//! Spend type repository for JSON storage

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{SpendType, SpendTypeId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable spend type data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpendTypeData {
    #[serde(default)]
    pub last_id: SpendTypeId,
    #[serde(default)]
    pub spend_types: Vec<SpendType>,
}

/// Repository for spend type persistence
pub struct SpendTypeRepository {
    path: PathBuf,
    types: RwLock<BTreeMap<SpendTypeId, SpendType>>,
    last_id: RwLock<SpendTypeId>,
    writer: Mutex<()>,
}

impl SpendTypeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            types: RwLock::new(BTreeMap::new()),
            last_id: RwLock::new(SpendTypeId::NONE),
            writer: Mutex::new(()),
        }
    }

    /// Serialize hierarchy changes
    ///
    /// Held from the snapshot a parent change is checked against until the
    /// change is saved.
    pub fn lock_writer(&self) -> LedgerResult<MutexGuard<'_, ()>> {
        self.writer
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire writer lock: {}", e)))
    }

    /// Load spend types from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: SpendTypeData = read_json(&self.path)?;

        let mut types = self
            .types
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut last_id = self
            .last_id
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        types.clear();
        *last_id = file_data.last_id;
        for spend_type in file_data.spend_types {
            *last_id = (*last_id).max(spend_type.id);
            types.insert(spend_type.id, spend_type);
        }

        Ok(())
    }

    /// Save spend types to disk
    pub fn save(&self) -> LedgerResult<()> {
        let types = self
            .types
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        self.write_file(&types)
    }

    fn write_file(&self, types: &BTreeMap<SpendTypeId, SpendType>) -> LedgerResult<()> {
        let last_id = self
            .last_id
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = SpendTypeData {
            last_id: *last_id,
            spend_types: types.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: SpendTypeId) -> LedgerResult<Option<SpendType>> {
        let types = self
            .types
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(types.get(&id).cloned())
    }

    /// All spend types in id order
    pub fn get_all(&self) -> LedgerResult<Vec<SpendType>> {
        let types = self
            .types
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(types.values().cloned().collect())
    }

    /// Direct children of `id`
    pub fn get_children(&self, id: SpendTypeId) -> LedgerResult<Vec<SpendType>> {
        let types = self
            .types
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(types
            .values()
            .filter(|t| t.parent_id == Some(id))
            .cloned()
            .collect())
    }

    pub fn next_id(&self) -> LedgerResult<SpendTypeId> {
        let mut last_id = self
            .last_id
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *last_id = last_id.next();
        Ok(*last_id)
    }

    /// Insert or update a spend type and write the file
    ///
    /// Returns the entry that was replaced. If the write fails the map is
    /// left as it was before the call.
    pub fn upsert_and_save(&self, spend_type: SpendType) -> LedgerResult<Option<SpendType>> {
        let mut types = self
            .types
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let id = spend_type.id;
        let previous = types.insert(id, spend_type);
        if let Err(e) = self.write_file(&types) {
            match &previous {
                Some(old) => types.insert(id, old.clone()),
                None => types.remove(&id),
            };
            return Err(e);
        }

        Ok(previous)
    }

    /// Delete a spend type and write the file
    ///
    /// Returns the removed entry, or `None` if there was nothing to remove.
    /// If the write fails the entry is put back.
    pub fn delete_and_save(&self, id: SpendTypeId) -> LedgerResult<Option<SpendType>> {
        let mut types = self
            .types
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let Some(removed) = types.remove(&id) else {
            return Ok(None);
        };
        if let Err(e) = self.write_file(&types) {
            types.insert(id, removed);
            return Err(e);
        }

        Ok(Some(removed))
    }

    pub fn count(&self) -> LedgerResult<usize> {
        let types = self
            .types
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(types.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SpendTypeRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = SpendTypeRepository::new(temp_dir.path().join("spend_types.json"));
        (temp_dir, repo)
    }

    fn spend_type(id: u64, name: &str, parent: Option<u64>) -> SpendType {
        SpendType {
            id: SpendTypeId::new(id),
            name: name.into(),
            parent_id: parent.map(SpendTypeId::new),
        }
    }

    #[test]
    fn test_crud() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let id = repo.next_id().unwrap();
        assert_eq!(id, SpendTypeId::new(1));
        assert_eq!(repo.upsert_and_save(spend_type(1, "Food", None)).unwrap(), None);
        repo.upsert_and_save(spend_type(2, "Groceries", Some(1))).unwrap();

        assert_eq!(repo.count().unwrap(), 2);
        assert_eq!(repo.get(id).unwrap().unwrap().name, "Food");
        assert_eq!(repo.get_children(id).unwrap().len(), 1);

        let replaced = repo.upsert_and_save(spend_type(1, "Meals", None)).unwrap();
        assert_eq!(replaced.unwrap().name, "Food");

        assert!(repo.delete_and_save(SpendTypeId::new(2)).unwrap().is_some());
        assert!(repo.delete_and_save(SpendTypeId::new(2)).unwrap().is_none());
        assert!(repo.get_children(id).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.next_id().unwrap();
        repo.next_id().unwrap();
        repo.upsert_and_save(spend_type(1, "Food", None)).unwrap();

        let reloaded = SpendTypeRepository::new(temp_dir.path().join("spend_types.json"));
        reloaded.load().unwrap();

        assert_eq!(reloaded.get_all().unwrap(), vec![spend_type(1, "Food", None)]);
        // Deleted ids are never reused
        assert_eq!(reloaded.next_id().unwrap(), SpendTypeId::new(3));
    }

    #[test]
    fn test_failed_write_keeps_previous_entries() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert_and_save(spend_type(1, "Food", None)).unwrap();
        repo.upsert_and_save(spend_type(2, "Cafe", Some(1))).unwrap();

        // A non-empty directory where the file belongs makes every write fail
        let path = temp_dir.path().join("spend_types.json");
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir_all(path.join("blocked")).unwrap();

        assert!(repo.upsert_and_save(spend_type(2, "Cafe", None)).is_err());
        assert_eq!(repo.get(SpendTypeId::new(2)).unwrap(), Some(spend_type(2, "Cafe", Some(1))));

        assert!(repo.upsert_and_save(spend_type(3, "Rent", None)).is_err());
        assert_eq!(repo.get(SpendTypeId::new(3)).unwrap(), None);

        assert!(repo.delete_and_save(SpendTypeId::new(2)).is_err());
        assert_eq!(repo.count().unwrap(), 2);
    }
}
