//! File-backed key/value store
//!
//! One `<key>.json` file per key inside the data directory.

use std::fs;
use std::path::PathBuf;

use super::file_io::{read_text, remove_file, write_text_atomic};
use super::port::KeyValueStore;
use crate::error::{HoaError, HoaResult};

/// Stores each key as a JSON file in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> HoaResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// Keys become file names, so only `[a-z0-9_-]` is allowed
fn validate_key(key: &str) -> HoaResult<()> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(HoaError::Validation(format!("Invalid storage key '{}'", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> HoaResult<Option<String>> {
        read_text(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> HoaResult<()> {
        write_text_atomic(self.path_for(key)?, value)
    }

    fn remove(&self, key: &str) -> HoaResult<()> {
        remove_file(self.path_for(key)?)
    }

    fn list(&self) -> HoaResult<Vec<String>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(HoaError::Storage(format!(
                    "Failed to list {}: {}",
                    self.dir.display(),
                    e
                )))
            }
        };

        let mut keys = Vec::new();
        for entry in read_dir {
            let entry =
                entry.map_err(|e| HoaError::Storage(format!("Failed to read entry: {}", e)))?;
            let name = entry.file_name();
            if let Some(key) = name.to_str().and_then(|n| n.strip_suffix(".json")) {
                if validate_key(key).is_ok() {
                    keys.push(key.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_per_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));

        store.set("income_2024", "[]").unwrap();
        assert!(temp_dir.path().join("data").join("income_2024.json").exists());
        assert_eq!(store.get("income_2024").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("income_2023").unwrap(), None);
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        store.set("houses", "[]").unwrap();
        store.set("events_2024", "[]").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
        fs::write(temp_dir.path().join("houses.json.tmp"), "x").unwrap();

        assert_eq!(store.list().unwrap(), vec!["events_2024", "houses"]);
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", "[]").unwrap_err().is_validation());
        assert!(store.get("Houses").is_err());
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        store.set("fines", "[]").unwrap();
        store.remove("fines").unwrap();
        assert_eq!(store.get("fines").unwrap(), None);
    }
}
