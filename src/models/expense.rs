//! Expense ledger entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_present, EntityKind, InsertPosition, Money, Record, RecordId};
use crate::error::HoaResult;

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    /// Expense category, denormalized at creation
    pub category: String,
    pub description: String,
    pub amount: Money,
    pub vendor: String,
    pub year: String,
}

impl Record for ExpenseRecord {
    const KIND: EntityKind = EntityKind::Expense;
    const INSERT: InsertPosition = InsertPosition::Front;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn validate(&self) -> HoaResult<()> {
        ensure_present("Expense category", &self.category)?;
        ensure_non_negative("Expense amount", self.amount)
    }
}

/// Input for a new expense entry
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: Money,
    pub vendor: String,
}

impl NewExpense {
    pub(crate) fn into_record(self, year: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: RecordId::unassigned(),
            date: self.date,
            category: self.category,
            description: self.description,
            amount: self.amount,
            vendor: self.vendor,
            year: year.to_string(),
        }
    }
}

/// Partial update of an expense entry
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}
