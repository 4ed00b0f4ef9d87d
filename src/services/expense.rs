//! Expense service

use std::collections::BTreeMap;

use crate::error::{HoaError, HoaResult};
use crate::models::{validate_year, ExpensePatch, ExpenseRecord, Money, NewExpense};
use crate::storage::{keys, Partition, Storage};

use super::Facade;

/// Service for the expense ledger of one year
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    year: String,
    partition: Partition<ExpenseRecord>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, year: &str) -> HoaResult<Self> {
        validate_year(year)?;
        Ok(Self {
            storage,
            year: year.to_string(),
            partition: Partition::new(keys::expenses(year)),
        })
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn list(&self) -> HoaResult<Vec<ExpenseRecord>> {
        self.storage.records().get_all(&self.partition)
    }

    pub fn get(&self, id: &str) -> HoaResult<ExpenseRecord> {
        self.list()?
            .into_iter()
            .find(|r| r.id == *id)
            .ok_or_else(|| HoaError::not_found("Expense", id))
    }

    pub fn create(&self, draft: NewExpense) -> HoaResult<ExpenseRecord> {
        self.storage
            .records()
            .create(&self.partition, draft.into_record(&self.year))
    }

    pub fn update(&self, id: &str, patch: &ExpensePatch) -> HoaResult<ExpenseRecord> {
        self.storage.records().update(&self.partition, id, patch)
    }

    pub fn delete(&self, id: &str) -> HoaResult<bool> {
        Ok(self.storage.records().delete(&self.partition, id)?.is_some())
    }

    /// Total spent per category, keyed by the category stored on each entry
    pub fn totals_by_category(&self) -> HoaResult<BTreeMap<String, Money>> {
        let mut totals = BTreeMap::new();
        for record in self.list()? {
            *totals.entry(record.category).or_insert_with(Money::zero) += record.amount;
        }
        Ok(totals)
    }
}

impl Facade for ExpenseService<'_> {
    type Record = ExpenseRecord;
    type Draft = NewExpense;
    type Patch = ExpensePatch;

    fn get_all(&self) -> HoaResult<Vec<ExpenseRecord>> {
        self.list()
    }

    fn create(&self, draft: NewExpense) -> HoaResult<ExpenseRecord> {
        ExpenseService::create(self, draft)
    }

    fn update(&self, id: &str, patch: &ExpensePatch) -> HoaResult<ExpenseRecord> {
        ExpenseService::update(self, id, patch)
    }

    fn delete(&self, id: &str) -> HoaResult<bool> {
        ExpenseService::delete(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(category: &str, units: i64) -> NewExpense {
        NewExpense {
            date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            category: category.into(),
            description: "Pago mensual".into(),
            amount: Money::from_units(units),
            vendor: "Proveedor".into(),
        }
    }

    #[test]
    fn test_newest_first() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage, "2024").unwrap();

        service.create(expense("limpieza", 1800)).unwrap();
        service.create(expense("seguridad", 6000)).unwrap();

        let all = service.list().unwrap();
        assert_eq!(all[0].category, "seguridad");
        assert_eq!(all[1].category, "limpieza");
        assert!(all.iter().all(|e| e.year == "2024"));
    }

    #[test]
    fn test_totals_by_category() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage, "2024").unwrap();
        service.create(expense("limpieza", 1800)).unwrap();
        service.create(expense("limpieza", 200)).unwrap();
        service.create(expense("seguridad", 6000)).unwrap();

        let totals = service.totals_by_category().unwrap();
        assert_eq!(totals["limpieza"], Money::from_units(2000));
        assert_eq!(totals["seguridad"], Money::from_units(6000));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage, "2024").unwrap();
        let err = service.create(expense("limpieza", -1)).unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().unwrap().is_empty());
    }
}
