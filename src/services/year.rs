//! Fiscal-year index service

use tracing::info;

use crate::error::HoaResult;
use crate::models::YearIndex;
use crate::storage::{keys, Storage};

/// Service for the list of known fiscal years
pub struct YearService<'a> {
    storage: &'a Storage,
}

impl<'a> YearService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Known years, newest first
    pub fn list(&self) -> HoaResult<Vec<String>> {
        let index: YearIndex = self.storage.records().singleton()?;
        Ok(index.years().to_vec())
    }

    /// Add a year; returns false if it was already known
    pub fn add(&self, year: &str) -> HoaResult<bool> {
        self.storage
            .records()
            .modify(|index: &mut YearIndex| index.insert(year))
    }

    /// Remove a year from the index; its ledgers stay on disk
    pub fn remove(&self, year: &str) -> HoaResult<bool> {
        self.storage
            .records()
            .modify(|index: &mut YearIndex| Ok(index.remove(year)))
    }

    /// Remove a year and delete its income, expense and event ledgers
    pub fn purge(&self, year: &str) -> HoaResult<bool> {
        crate::models::validate_year(year)?;
        let removed = self.remove(year)?;
        for key in keys::for_year(year) {
            self.storage.records().remove_key(&key)?;
        }
        info!(year, "Purged year");
        Ok(removed)
    }
}
