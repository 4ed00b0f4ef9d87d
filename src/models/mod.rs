//! Core data models for the HOA back office
//!
//! This module contains the records kept by the association: income and
//! expense entries, events, houses, fine definitions, categories, the
//! singleton settings objects and the fiscal-year index.

pub mod association;
pub mod category;
pub mod event;
pub mod expense;
pub mod fine;
pub mod house;
pub mod ids;
pub mod income;
pub mod money;
pub mod year;

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::HoaResult;

pub use association::{AssociationConfig, AssociationPatch, CommunicationConfig, CommunicationPatch};
pub use category::{Category, CategoryKind, CategoryPatch, NewCategory};
pub use event::{EventPatch, EventRecord, EventStatus, NewEvent};
pub use expense::{ExpensePatch, ExpenseRecord, NewExpense};
pub use fine::{FineDefinition, FinePatch, NewFine};
pub use house::{House, HousePatch, HouseStatus, NewHouse};
pub use ids::RecordId;
pub use income::{IncomePatch, IncomeRecord, IncomeStatus, NewIncome};
pub use money::Money;
pub use year::{validate_year, YearIndex};

/// The kinds of entity the store persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Income,
    Expense,
    Event,
    House,
    Fine,
    Category,
    AssociationConfig,
    CommunicationConfig,
    YearIndex,
}

impl EntityKind {
    /// Human-readable name used in error messages
    pub const fn label(&self) -> &'static str {
        match self {
            EntityKind::Income => "Income",
            EntityKind::Expense => "Expense",
            EntityKind::Event => "Event",
            EntityKind::House => "House",
            EntityKind::Fine => "Fine",
            EntityKind::Category => "Category",
            EntityKind::AssociationConfig => "Association config",
            EntityKind::CommunicationConfig => "Communication config",
            EntityKind::YearIndex => "Year index",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a newly created record lands in its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Newest first (ledger entries)
    Front,
    /// Chronological (events, houses, definitions)
    Back,
}

/// A record that lives in an id-keyed collection of the record store
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KIND: EntityKind;
    const INSERT: InsertPosition = InsertPosition::Back;
    /// Prefix prepended to generated ids
    const ID_PREFIX: &'static str = "";

    fn id(&self) -> &RecordId;

    fn set_id(&mut self, id: RecordId);

    /// Check the record's invariants
    fn validate(&self) -> HoaResult<()> {
        Ok(())
    }

    /// Check the record against the other records of its partition
    ///
    /// Runs under the store's write lock, on create and on update.
    fn check_conflicts(&self, _others: &[Self]) -> HoaResult<()> {
        Ok(())
    }
}

/// A value stored alone under a fixed key
pub trait Singleton: Serialize + DeserializeOwned + Clone {
    const KIND: EntityKind;
    const KEY: &'static str;

    /// Value written on first read
    fn initial() -> Self;

    fn validate(&self) -> HoaResult<()> {
        Ok(())
    }
}

/// Reject negative amounts
pub(crate) fn ensure_non_negative(field: &str, amount: Money) -> HoaResult<()> {
    if amount.is_negative() {
        return Err(crate::error::HoaError::Validation(format!(
            "{} cannot be negative (got {})",
            field, amount
        )));
    }
    Ok(())
}

/// Reject blank required text
pub(crate) fn ensure_present(field: &str, value: &str) -> HoaResult<()> {
    if value.trim().is_empty() {
        return Err(crate::error::HoaError::Validation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}
