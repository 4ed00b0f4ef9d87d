//! The key/value port the record store persists through
//!
//! Values are opaque JSON strings. The store never looks inside them; the
//! record store above it owns (de)serialization.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{HoaError, HoaResult};

/// A string-keyed store of JSON payloads
pub trait KeyValueStore: Send + Sync {
    /// Payload under `key`, or `None` if it was never written
    fn get(&self, key: &str) -> HoaResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> HoaResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> HoaResult<()>;

    /// All keys currently stored, sorted
    fn list(&self) -> HoaResult<Vec<String>>;
}

/// In-process store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> HoaResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| HoaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> HoaResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| HoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> HoaResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| HoaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.remove(key);
        Ok(())
    }

    fn list(&self) -> HoaResult<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| HoaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("houses").unwrap(), None);

        store.set("houses", "[]").unwrap();
        store.set("fines", "[]").unwrap();
        assert_eq!(store.get("houses").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.list().unwrap(), vec!["fines", "houses"]);

        store.remove("houses").unwrap();
        store.remove("houses").unwrap();
        assert_eq!(store.list().unwrap(), vec!["fines"]);
    }
}
