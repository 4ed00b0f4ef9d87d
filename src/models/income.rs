//! Income ledger entries
//!
//! Fees, fines and other money received, partitioned by fiscal year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ensure_non_negative, ensure_present, EntityKind, InsertPosition, Money, Record, RecordId};
use crate::error::HoaResult;

/// Payment state of an income entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IncomeStatus {
    #[default]
    Pending,
    Paid,
}

impl fmt::Display for IncomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncomeStatus::Pending => write!(f, "Pending"),
            IncomeStatus::Paid => write!(f, "Paid"),
        }
    }
}

impl std::str::FromStr for IncomeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(IncomeStatus::Pending),
            "paid" | "pagado" => Ok(IncomeStatus::Paid),
            other => Err(format!("unknown income status '{}'", other)),
        }
    }
}

/// A single income entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    /// Income category, denormalized as the category id/name at creation
    #[serde(rename = "type")]
    pub kind: String,
    pub house: String,
    pub amount: Money,
    #[serde(default)]
    pub status: IncomeStatus,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Record for IncomeRecord {
    const KIND: EntityKind = EntityKind::Income;
    const INSERT: InsertPosition = InsertPosition::Front;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn validate(&self) -> HoaResult<()> {
        ensure_present("Income type", &self.kind)?;
        ensure_present("House", &self.house)?;
        ensure_non_negative("Income amount", self.amount)
    }
}

/// Input for a new income entry; the year comes from the facade
#[derive(Debug, Clone)]
pub struct NewIncome {
    pub date: NaiveDate,
    pub kind: String,
    pub house: String,
    pub amount: Money,
    pub status: Option<IncomeStatus>,
    pub description: Option<String>,
}

impl NewIncome {
    pub fn new(kind: impl Into<String>, house: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self {
            date,
            kind: kind.into(),
            house: house.into(),
            amount,
            status: None,
            description: None,
        }
    }

    pub(crate) fn into_record(self, year: &str) -> IncomeRecord {
        IncomeRecord {
            id: RecordId::unassigned(),
            date: self.date,
            kind: self.kind,
            house: self.house,
            amount: self.amount,
            status: self.status.unwrap_or_default(),
            year: year.to_string(),
            description: self.description,
        }
    }
}

/// Partial update of an income entry
#[derive(Debug, Clone, Default, Serialize)]
pub struct IncomePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IncomeStatus>,
    /// `Some(None)` clears the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}
