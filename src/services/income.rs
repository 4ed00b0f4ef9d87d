//! Income service
//!
//! Fees, fines and other income of one fiscal year.

use crate::error::{HoaError, HoaResult};
use crate::models::{
    validate_year, IncomePatch, IncomeRecord, IncomeStatus, Money, NewIncome,
};
use crate::storage::{keys, Partition, Storage};

use super::Facade;

/// Service for the income ledger of one year
pub struct IncomeService<'a> {
    storage: &'a Storage,
    year: String,
    partition: Partition<IncomeRecord>,
}

impl<'a> IncomeService<'a> {
    /// Bind to `year`; fails if the year is not four digits
    pub fn new(storage: &'a Storage, year: &str) -> HoaResult<Self> {
        validate_year(year)?;
        Ok(Self {
            storage,
            year: year.to_string(),
            partition: Partition::new(keys::income(year)),
        })
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// All entries, newest first
    pub fn list(&self) -> HoaResult<Vec<IncomeRecord>> {
        self.storage.records().get_all(&self.partition)
    }

    pub fn get(&self, id: &str) -> HoaResult<IncomeRecord> {
        self.list()?
            .into_iter()
            .find(|r| r.id == *id)
            .ok_or_else(|| HoaError::not_found("Income", id))
    }

    /// Record a new entry; it starts as pending unless a status is given
    pub fn create(&self, draft: NewIncome) -> HoaResult<IncomeRecord> {
        let record = draft.into_record(&self.year);
        self.storage.records().create(&self.partition, record)
    }

    pub fn update(&self, id: &str, patch: &IncomePatch) -> HoaResult<IncomeRecord> {
        self.storage.records().update(&self.partition, id, patch)
    }

    pub fn delete(&self, id: &str) -> HoaResult<bool> {
        Ok(self.storage.records().delete(&self.partition, id)?.is_some())
    }

    /// Mark an entry as paid
    pub fn mark_paid(&self, id: &str) -> HoaResult<IncomeRecord> {
        let patch = IncomePatch {
            status: Some(IncomeStatus::Paid),
            ..Default::default()
        };
        self.update(id, &patch)
    }

    /// Entries of one house, matched by house name
    pub fn for_house(&self, house: &str) -> HoaResult<Vec<IncomeRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.house == house)
            .collect())
    }

    /// Sum of paid and pending amounts
    pub fn totals(&self) -> HoaResult<(Money, Money)> {
        let records = self.list()?;
        let paid = records
            .iter()
            .filter(|r| r.status == IncomeStatus::Paid)
            .map(|r| r.amount)
            .sum();
        let pending = records
            .iter()
            .filter(|r| r.status == IncomeStatus::Pending)
            .map(|r| r.amount)
            .sum();
        Ok((paid, pending))
    }
}

impl Facade for IncomeService<'_> {
    type Record = IncomeRecord;
    type Draft = NewIncome;
    type Patch = IncomePatch;

    fn get_all(&self) -> HoaResult<Vec<IncomeRecord>> {
        self.list()
    }

    fn create(&self, draft: NewIncome) -> HoaResult<IncomeRecord> {
        IncomeService::create(self, draft)
    }

    fn update(&self, id: &str, patch: &IncomePatch) -> HoaResult<IncomeRecord> {
        IncomeService::update(self, id, patch)
    }

    fn delete(&self, id: &str) -> HoaResult<bool> {
        IncomeService::delete(self, id)
    }
}
