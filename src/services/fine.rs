//! Fine catalogue service

use crate::error::{HoaError, HoaResult};
use crate::models::{fine::seed_fines, FineDefinition, FinePatch, NewFine};
use crate::storage::{keys, Partition, Storage};

use super::Facade;

/// Service for the fine catalogue
pub struct FineService<'a> {
    storage: &'a Storage,
    partition: Partition<FineDefinition>,
}

impl<'a> FineService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            partition: Partition::seeded(keys::FINES, seed_fines),
        }
    }

    pub fn list(&self) -> HoaResult<Vec<FineDefinition>> {
        self.storage.records().get_all(&self.partition)
    }

    pub fn get(&self, id: &str) -> HoaResult<FineDefinition> {
        self.list()?
            .into_iter()
            .find(|f| f.id == *id)
            .ok_or_else(|| HoaError::not_found("Fine", id))
    }

    /// Fines that can currently be applied
    pub fn active(&self) -> HoaResult<Vec<FineDefinition>> {
        Ok(self.list()?.into_iter().filter(|f| f.active).collect())
    }

    pub fn create(&self, draft: NewFine) -> HoaResult<FineDefinition> {
        self.storage
            .records()
            .create(&self.partition, draft.into_record())
    }

    pub fn update(&self, id: &str, patch: &FinePatch) -> HoaResult<FineDefinition> {
        self.storage.records().update(&self.partition, id, patch)
    }

    pub fn delete(&self, id: &str) -> HoaResult<bool> {
        Ok(self.storage.records().delete(&self.partition, id)?.is_some())
    }
}

impl Facade for FineService<'_> {
    type Record = FineDefinition;
    type Draft = NewFine;
    type Patch = FinePatch;

    fn get_all(&self) -> HoaResult<Vec<FineDefinition>> {
        self.list()
    }

    fn create(&self, draft: NewFine) -> HoaResult<FineDefinition> {
        FineService::create(self, draft)
    }

    fn update(&self, id: &str, patch: &FinePatch) -> HoaResult<FineDefinition> {
        FineService::update(self, id, patch)
    }

    fn delete(&self, id: &str) -> HoaResult<bool> {
        FineService::delete(self, id)
    }
}
