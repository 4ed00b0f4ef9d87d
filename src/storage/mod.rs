//! Storage layer for the HOA back office
//!
//! A [`RecordStore`] over a [`KeyValueStore`] port. The CLI uses one JSON
//! file per key with atomic writes; tests and embedders use the in-memory
//! store.

pub mod file_io;
pub mod file_store;
pub mod latency;
pub mod port;
pub mod record_store;

pub use file_store::FileStore;
pub use latency::Latency;
pub use port::{KeyValueStore, MemoryStore};
pub use record_store::{keys, Partition, RecordStore};

use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::config::{HoaPaths, Settings};
use crate::error::HoaError;

/// Main storage coordinator handed to every service
pub struct Storage {
    paths: Option<HoaPaths>,
    records: RecordStore,
}

impl Storage {
    /// Open the file-backed store under `paths`, journaling to its audit log
    pub fn open(paths: HoaPaths, settings: &Settings) -> Result<Self, HoaError> {
        paths.ensure_directories()?;

        let backend = Arc::new(FileStore::new(paths.data_dir()));
        let records = RecordStore::new(backend, settings.latency())
            .with_audit(AuditLogger::new(paths.audit_log()));

        Ok(Self {
            paths: Some(paths),
            records,
        })
    }

    /// A fresh in-memory store with no latency and no journal
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryStore::new()), Latency::none())
    }

    pub fn with_backend(backend: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self {
            paths: None,
            records: RecordStore::new(backend, latency),
        }
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Paths of a file-backed store
    pub fn paths(&self) -> Option<&HoaPaths> {
        self.paths.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{house::seed_houses, House};
    use tempfile::TempDir;

    fn quiet_settings() -> Settings {
        Settings {
            latency_min_ms: 0,
            latency_max_ms: 0,
            ..Settings::default()
        }
    }

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HoaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &quiet_settings()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.paths().is_some());
        assert!(storage.records().audit().is_some());
    }

    #[test]
    fn test_writes_are_journaled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HoaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &quiet_settings()).unwrap();
        let partition = Partition::seeded(keys::HOUSES, seed_houses);

        // seeding is not a journaled write
        let houses: Vec<House> = storage.records().get_all(&partition).unwrap();
        assert_eq!(houses.len(), 45);
        storage.records().delete(&partition, "45").unwrap();

        let entries = storage.records().audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "houses");
        assert_eq!(entries[0].record_id, "45");
        assert!(temp_dir.path().join("data").join("houses.json").exists());
    }

    #[test]
    fn test_in_memory_has_no_paths() {
        let storage = Storage::in_memory();
        assert!(storage.paths().is_none());
        assert!(storage.records().audit().is_none());
    }
}
