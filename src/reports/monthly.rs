//! Monthly financial report from real ledger entries

use chrono::Datelike;

use crate::documents::format::month_name;
use crate::documents::{
    CollectionStats, ExpenseBreakdown, IncomeBreakdown, MonthlyReportData, Projections,
};
use crate::error::{HoaError, HoaResult};
use crate::models::{ExpenseRecord, House, IncomeRecord, IncomeStatus, Money};
use crate::services::{ExpenseService, HouseService, IncomeService};
use crate::storage::Storage;

/// Build the report for `month` (1..=12) of `year` from stored records
pub fn monthly_report(storage: &Storage, year: &str, month: u32) -> HoaResult<MonthlyReportData> {
    let incomes = IncomeService::new(storage, year)?.list()?;
    let expenses = ExpenseService::new(storage, year)?.list()?;
    let houses = HouseService::new(storage).active()?;
    MonthlyReportData::from_records(year, month, &incomes, &expenses, &houses)
}

impl MonthlyReportData {
    /// Aggregate one month of entries
    ///
    /// Paid income is split by its category id; custom income categories
    /// count as other income and custom expense categories as
    /// administration. A house is up to date once it has a paid `cuota`
    /// in the month.
    pub fn from_records(
        year: &str,
        month: u32,
        incomes: &[IncomeRecord],
        expenses: &[ExpenseRecord],
        active_houses: &[House],
    ) -> HoaResult<Self> {
        let name = month_name(month)
            .ok_or_else(|| HoaError::Validation(format!("Month must be 1-12 (got {})", month)))?;

        let mut income = IncomeBreakdown::default();
        let mut total_income = Money::zero();
        let in_month_incomes: Vec<&IncomeRecord> =
            incomes.iter().filter(|i| i.date.month() == month).collect();
        for entry in in_month_incomes.iter().filter(|i| i.status == IncomeStatus::Paid) {
            total_income += entry.amount;
            let slot = match entry.kind.as_str() {
                "cuota" => &mut income.fees,
                "multa" => &mut income.fines,
                "evento" => &mut income.events,
                _ => &mut income.other,
            };
            *slot = Some(slot.unwrap_or_default() + entry.amount);
        }

        let mut expense = ExpenseBreakdown::default();
        let mut total_expenses = Money::zero();
        for entry in expenses.iter().filter(|e| e.date.month() == month) {
            total_expenses += entry.amount;
            let slot = match entry.category.as_str() {
                "mantenimiento" => &mut expense.maintenance,
                "servicios" => &mut expense.services,
                "seguridad" => &mut expense.security,
                "limpieza" => &mut expense.cleaning,
                "jardineria" => &mut expense.gardening,
                _ => &mut expense.administration,
            };
            *slot = Some(slot.unwrap_or_default() + entry.amount);
        }

        let total_houses = active_houses.len() as u32;
        let up_to_date = active_houses
            .iter()
            .filter(|house| {
                in_month_incomes.iter().any(|i| {
                    i.kind == "cuota"
                        && i.status == IncomeStatus::Paid
                        && (i.house == house.name || i.house == house.number)
                })
            })
            .count() as u32;
        let rate = (total_houses > 0).then(|| (up_to_date * 100 + total_houses / 2) / total_houses);

        Ok(Self {
            period: Some(format!("{} {}", name, year)),
            generated_by: Some("Sistema Administrativo".to_string()),
            income: Some(total_income),
            expenses: Some(total_expenses),
            income_breakdown: Some(income),
            expense_breakdown: Some(expense),
            collection: Some(CollectionStats {
                total_houses: Some(total_houses),
                up_to_date: Some(up_to_date),
                delinquent: Some(total_houses - up_to_date),
                rate,
            }),
            notes: None,
            projections: Some(Projections {
                next_month_balance: Some(total_income - total_expenses),
                expected_income: Some(total_income.scale(105, 100)),
                scheduled_expenses: Some(total_expenses.scale(95, 100)),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewExpense, NewIncome};
    use chrono::NaiveDate;

    fn paid(kind: &str, house: &str, units: i64, month: u32) -> NewIncome {
        let mut draft = NewIncome::new(
            kind,
            house,
            Money::from_units(units),
            NaiveDate::from_ymd_opt(2024, month, 5).unwrap(),
        );
        draft.status = Some(IncomeStatus::Paid);
        draft
    }

    #[test]
    fn test_monthly_report_from_records() {
        let storage = Storage::in_memory();
        let incomes = IncomeService::new(&storage, "2024").unwrap();
        incomes.create(paid("cuota", "Casa 1", 2500, 3)).unwrap();
        incomes.create(paid("cuota", "2", 2500, 3)).unwrap();
        incomes.create(paid("multa", "Casa 3", 250, 3)).unwrap();
        incomes.create(paid("custom-1", "Casa 4", 100, 3)).unwrap();
        incomes.create(paid("cuota", "Casa 5", 2500, 4)).unwrap();
        incomes
            .create(NewIncome::new(
                "cuota",
                "Casa 6",
                Money::from_units(2500),
                NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            ))
            .unwrap();
        ExpenseService::new(&storage, "2024")
            .unwrap()
            .create(NewExpense {
                date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
                category: "jardineria".into(),
                description: "Poda".into(),
                amount: Money::from_units(900),
                vendor: "Verde".into(),
            })
            .unwrap();

        let report = monthly_report(&storage, "2024", 3).unwrap();

        assert_eq!(report.period.as_deref(), Some("Marzo 2024"));
        assert_eq!(report.income, Some(Money::from_units(5350)));
        assert_eq!(report.expenses, Some(Money::from_units(900)));
        let income = report.income_breakdown.clone().unwrap();
        assert_eq!(income.fees, Some(Money::from_units(5000)));
        assert_eq!(income.fines, Some(Money::from_units(250)));
        assert_eq!(income.events, None);
        assert_eq!(income.other, Some(Money::from_units(100)));
        let stats = report.collection.clone().unwrap();
        assert_eq!(stats.total_houses, Some(45));
        assert_eq!(stats.up_to_date, Some(2));
        assert_eq!(stats.delinquent, Some(43));
        assert_eq!(stats.rate, Some(4));
        assert_eq!(report.net_balance(), Money::from_units(4450));
    }

    #[test]
    fn test_invalid_month() {
        let err = MonthlyReportData::from_records("2024", 13, &[], &[], &[]).unwrap_err();
        assert!(err.is_validation());
    }
}
