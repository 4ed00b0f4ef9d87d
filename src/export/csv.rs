//! CSV export of a year's ledgers
//!
//! Income and expense entries share one sheet, one row per entry.

use std::io::Write;

use serde::Serialize;

use crate::error::{HoaError, HoaResult};
use crate::models::{ExpenseRecord, IncomeRecord, Money};
use crate::services::{ExpenseService, IncomeService};
use crate::storage::Storage;

#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    kind: &'static str,
    id: &'a str,
    date: String,
    category: &'a str,
    /// House for income, vendor for expenses
    counterpart: &'a str,
    description: &'a str,
    amount: String,
    status: String,
}

fn decimal(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.units().abs(), amount.cents_part())
}

impl<'a> From<&'a IncomeRecord> for LedgerRow<'a> {
    fn from(income: &'a IncomeRecord) -> Self {
        Self {
            kind: "income",
            id: income.id.as_str(),
            date: income.date.to_string(),
            category: &income.kind,
            counterpart: &income.house,
            description: income.description.as_deref().unwrap_or(""),
            amount: decimal(income.amount),
            status: income.status.to_string(),
        }
    }
}

impl<'a> From<&'a ExpenseRecord> for LedgerRow<'a> {
    fn from(expense: &'a ExpenseRecord) -> Self {
        Self {
            kind: "expense",
            id: expense.id.as_str(),
            date: expense.date.to_string(),
            category: &expense.category,
            counterpart: &expense.vendor,
            description: &expense.description,
            amount: decimal(expense.amount),
            status: String::new(),
        }
    }
}

/// Write every income and expense entry of `year`
pub fn export_ledger_csv<W: Write>(storage: &Storage, year: &str, writer: W) -> HoaResult<()> {
    let incomes = IncomeService::new(storage, year)?.list()?;
    let expenses = ExpenseService::new(storage, year)?.list()?;

    let mut csv = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| HoaError::Export(e.to_string());

    for row in incomes
        .iter()
        .map(LedgerRow::from)
        .chain(expenses.iter().map(LedgerRow::from))
    {
        csv.serialize(row).map_err(export_err)?;
    }
    if incomes.is_empty() && expenses.is_empty() {
        // serialize writes the header with the first row only
        csv.write_record([
            "kind",
            "id",
            "date",
            "category",
            "counterpart",
            "description",
            "amount",
            "status",
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(|e| HoaError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewExpense, NewIncome};
    use chrono::NaiveDate;

    #[test]
    fn test_export_ledger_csv() {
        let storage = Storage::in_memory();
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        IncomeService::new(&storage, "2024")
            .unwrap()
            .create(NewIncome::new("cuota", "Casa 1", Money::from_cents(250_050), date))
            .unwrap();
        ExpenseService::new(&storage, "2024")
            .unwrap()
            .create(NewExpense {
                date,
                category: "servicios".into(),
                description: "Luz, áreas comunes".into(),
                amount: Money::from_units(1200),
                vendor: "CFE".into(),
            })
            .unwrap();

        let mut out = Vec::new();
        export_ledger_csv(&storage, "2024", &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "kind,id,date,category,counterpart,description,amount,status");
        assert!(lines[1].starts_with("income,"));
        assert!(lines[1].ends_with(",cuota,Casa 1,,2500.50,Pending"));
        // the comma forces quoting
        assert!(lines[2].contains("\"Luz, áreas comunes\",1200.00,"));
    }

    #[test]
    fn test_empty_year_has_header() {
        let storage = Storage::in_memory();
        let mut out = Vec::new();
        export_ledger_csv(&storage, "2025", &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "kind,id,date,category,counterpart,description,amount,status\n"
        );
    }
}
