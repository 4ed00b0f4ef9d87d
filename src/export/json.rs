//! JSON export of a fiscal year
//!
//! A year snapshot carries the year's ledgers and events together with
//! the global records they refer to, under a schema version.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HoaError, HoaResult};
use crate::models::{
    AssociationConfig, Category, CategoryKind, EventRecord, ExpenseRecord, FineDefinition, House,
    IncomeRecord,
};
use crate::services::{
    CategoryService, ConfigService, EventService, ExpenseService, FineService, HouseService,
    IncomeService,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub year: String,
    pub association: AssociationConfig,
    pub houses: Vec<House>,
    pub fines: Vec<FineDefinition>,
    pub income_categories: Vec<Category>,
    pub expense_categories: Vec<Category>,
    pub incomes: Vec<IncomeRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub events: Vec<EventRecord>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub income_count: usize,
    pub expense_count: usize,
    pub event_count: usize,
    /// Earliest ledger date
    pub earliest_entry: Option<NaiveDate>,
    /// Latest ledger date
    pub latest_entry: Option<NaiveDate>,
}

impl YearExport {
    pub fn from_storage(storage: &Storage, year: &str) -> HoaResult<Self> {
        let incomes = IncomeService::new(storage, year)?.list()?;
        let expenses = ExpenseService::new(storage, year)?.list()?;
        let events = EventService::new(storage, year)?.list()?;
        let categories = CategoryService::new(storage);

        let dates = incomes
            .iter()
            .map(|i| i.date)
            .chain(expenses.iter().map(|e| e.date));
        let earliest_entry = dates.clone().min();
        let latest_entry = dates.max();

        let metadata = ExportMetadata {
            income_count: incomes.len(),
            expense_count: expenses.len(),
            event_count: events.len(),
            earliest_entry,
            latest_entry,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            year: year.to_string(),
            association: ConfigService::new(storage).association()?,
            houses: HouseService::new(storage).list()?,
            fines: FineService::new(storage).list()?,
            income_categories: categories.list(CategoryKind::Income)?,
            expense_categories: categories.list(CategoryKind::Expense)?,
            incomes,
            expenses,
            events,
            metadata,
        })
    }
}

pub fn export_year_json<W: Write>(
    storage: &Storage,
    year: &str,
    writer: &mut W,
    pretty: bool,
) -> HoaResult<()> {
    let export = YearExport::from_storage(storage, year)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| HoaError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewIncome};

    #[test]
    fn test_year_export() {
        let storage = Storage::in_memory();
        IncomeService::new(&storage, "2024")
            .unwrap()
            .create(NewIncome::new(
                "cuota",
                "Casa 1",
                Money::from_units(2500),
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            ))
            .unwrap();

        let export = YearExport::from_storage(&storage, "2024").unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.houses.len(), 45);
        assert_eq!(export.fines.len(), 5);
        assert_eq!(export.metadata.income_count, 1);
        assert_eq!(
            export.metadata.earliest_entry,
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn test_json_output_parses() {
        let storage = Storage::in_memory();
        let mut out = Vec::new();
        export_year_json(&storage, "2023", &mut out, true).unwrap();

        let parsed: YearExport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.year, "2023");
        assert!(parsed.incomes.is_empty());
        assert_eq!(parsed.metadata.latest_entry, None);
    }

    #[test]
    fn test_invalid_year_rejected() {
        let storage = Storage::in_memory();
        let mut out = Vec::new();
        let err = export_year_json(&storage, "24", &mut out, false).unwrap_err();
        assert!(err.is_validation());
    }
}
