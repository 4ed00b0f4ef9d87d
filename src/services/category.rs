//! Category service
//!
//! Manages the income and expense category lists. Seeded categories are
//! protected from deletion. Deleting a category never touches ledger
//! entries, which keep the category text they were created with.

use tracing::debug;

use crate::error::{HoaError, HoaResult};
use crate::models::{category::seed_categories, Category, CategoryKind, CategoryPatch, NewCategory};
use crate::storage::{Partition, Storage};

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn partition(kind: CategoryKind) -> Partition<Category> {
        let seed: fn() -> Vec<Category> = match kind {
            CategoryKind::Income => || seed_categories(CategoryKind::Income),
            CategoryKind::Expense => || seed_categories(CategoryKind::Expense),
        };
        Partition::seeded(kind.storage_key(), seed)
    }

    pub fn list(&self, kind: CategoryKind) -> HoaResult<Vec<Category>> {
        self.storage.records().get_all(&Self::partition(kind))
    }

    /// Active categories only
    pub fn active(&self, kind: CategoryKind) -> HoaResult<Vec<Category>> {
        Ok(self
            .list(kind)?
            .into_iter()
            .filter(|c| c.active)
            .collect())
    }

    pub fn get(&self, kind: CategoryKind, id: &str) -> HoaResult<Option<Category>> {
        Ok(self.list(kind)?.into_iter().find(|c| c.id == *id))
    }

    /// Add a custom category with a `custom-<timestamp>` id
    ///
    /// Names are unique within a kind, ignoring case.
    pub fn add(&self, kind: CategoryKind, draft: NewCategory) -> HoaResult<Category> {
        self.storage
            .records()
            .create(&Self::partition(kind), draft.into_record())
    }

    /// Update a category; an unknown id is ignored and yields `None`
    pub fn update(
        &self,
        kind: CategoryKind,
        id: &str,
        patch: &CategoryPatch,
    ) -> HoaResult<Option<Category>> {
        match self.storage.records().update(&Self::partition(kind), id, patch) {
            Ok(category) => Ok(Some(category)),
            Err(e) if e.is_not_found() => {
                debug!(%kind, id, "Update of unknown category ignored");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a custom category; seeded categories cannot be deleted
    pub fn delete(&self, kind: CategoryKind, id: &str) -> HoaResult<bool> {
        if kind.is_protected(id) {
            return Err(HoaError::Validation(format!(
                "Category '{}' is a default {} category and cannot be deleted",
                id, kind
            )));
        }
        Ok(self
            .storage
            .records()
            .delete(&Self::partition(kind), id)?
            .is_some())
    }
}
