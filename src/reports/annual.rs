//! Annual balance
//!
//! Aggregates one fiscal year of income and expense entries into monthly
//! rows and per-category totals. Only paid income counts as collected;
//! pending income feeds the collection rate.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::Datelike;

use crate::documents::format::MONTH_NAMES;
use crate::documents::{AnnualBalanceData, BalanceStats, CategoryTotal, MonthRow};
use crate::error::{HoaError, HoaResult};
use crate::models::{ExpenseRecord, IncomeRecord, IncomeStatus, Money};
use crate::services::{ExpenseService, IncomeService};
use crate::storage::Storage;

/// Totals of one calendar month
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthTotals {
    pub income: Money,
    pub expenses: Money,
    pub entries: usize,
}

impl MonthTotals {
    pub fn balance(&self) -> Money {
        self.income - self.expenses
    }
}

#[derive(Debug, Clone)]
pub struct AnnualBalance {
    pub year: String,
    /// January first
    pub months: [MonthTotals; 12],
    pub income_by_category: Vec<(String, Money)>,
    pub expenses_by_category: Vec<(String, Money)>,
    pub collected: Money,
    pub pending: Money,
    pub transactions: usize,
}

impl AnnualBalance {
    /// Load the year's ledgers and aggregate them
    pub fn generate(storage: &Storage, year: &str) -> HoaResult<Self> {
        let incomes = IncomeService::new(storage, year)?.list()?;
        let expenses = ExpenseService::new(storage, year)?.list()?;
        Ok(Self::compute(year, &incomes, &expenses))
    }

    pub fn compute(year: &str, incomes: &[IncomeRecord], expenses: &[ExpenseRecord]) -> Self {
        let mut months = [MonthTotals::default(); 12];
        let mut income_by_category: BTreeMap<String, Money> = BTreeMap::new();
        let mut expenses_by_category: BTreeMap<String, Money> = BTreeMap::new();
        let mut collected = Money::zero();
        let mut pending = Money::zero();

        for income in incomes {
            let month = &mut months[income.date.month0() as usize];
            month.entries += 1;
            match income.status {
                IncomeStatus::Paid => {
                    month.income += income.amount;
                    collected += income.amount;
                    *income_by_category.entry(income.kind.clone()).or_default() += income.amount;
                }
                IncomeStatus::Pending => pending += income.amount,
            }
        }

        for expense in expenses {
            let month = &mut months[expense.date.month0() as usize];
            month.entries += 1;
            month.expenses += expense.amount;
            *expenses_by_category
                .entry(expense.category.clone())
                .or_default() += expense.amount;
        }

        Self {
            year: year.to_string(),
            months,
            income_by_category: sorted_by_total(income_by_category),
            expenses_by_category: sorted_by_total(expenses_by_category),
            collected,
            pending,
            transactions: incomes.len() + expenses.len(),
        }
    }

    pub fn total_expenses(&self) -> Money {
        self.months.iter().map(|m| m.expenses).sum()
    }

    pub fn net_balance(&self) -> Money {
        self.collected - self.total_expenses()
    }

    /// Paid share of all income, rounded percent; `None` without income
    pub fn collection_rate(&self) -> Option<u32> {
        let billed = (self.collected + self.pending).cents();
        if billed == 0 {
            return None;
        }
        let rate = (self.collected.cents() * 100 + billed / 2) / billed;
        u32::try_from(rate).ok()
    }

    /// Month with the highest balance among months with entries
    pub fn best_month(&self) -> Option<&'static str> {
        self.months
            .iter()
            .enumerate()
            .filter(|(_, m)| m.entries > 0)
            // ties keep the earliest month
            .fold(None, |best: Option<(usize, Money)>, (i, m)| match best {
                Some((_, b)) if b >= m.balance() => best,
                _ => Some((i, m.balance())),
            })
            .map(|(i, _)| MONTH_NAMES[i])
    }

    /// Shape the balance for the text generator
    pub fn to_document(&self) -> AnnualBalanceData {
        let months = self
            .months
            .iter()
            .zip(MONTH_NAMES)
            .map(|(m, name)| MonthRow {
                month: name.to_string(),
                income: m.income,
                expenses: m.expenses,
                balance: m.balance(),
            })
            .collect();

        AnnualBalanceData {
            year: Some(self.year.clone()),
            total_income: Some(self.collected),
            total_expenses: Some(self.total_expenses()),
            months,
            income_by_category: category_totals(&self.income_by_category),
            expenses_by_category: category_totals(&self.expenses_by_category),
            stats: Some(BalanceStats {
                collection_rate: self.collection_rate(),
                best_month: self.best_month().map(str::to_string),
                transactions: Some(self.transactions),
            }),
            notes: None,
        }
    }

    /// Monthly rows as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> HoaResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| HoaError::Export(e.to_string());

        csv.write_record(["month", "income", "expenses", "balance"])
            .map_err(export_err)?;
        for (m, name) in self.months.iter().zip(MONTH_NAMES) {
            csv.write_record([
                name.to_string(),
                m.income.to_string(),
                m.expenses.to_string(),
                m.balance().to_string(),
            ])
            .map_err(export_err)?;
        }
        csv.flush().map_err(|e| HoaError::Export(e.to_string()))
    }
}

fn sorted_by_total(totals: BTreeMap<String, Money>) -> Vec<(String, Money)> {
    let mut totals: Vec<_> = totals.into_iter().collect();
    // stable sort keeps names alphabetical within equal totals
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

fn category_totals(totals: &[(String, Money)]) -> Vec<CategoryTotal> {
    totals
        .iter()
        .map(|(category, total)| CategoryTotal {
            category: category.clone(),
            total: *total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewExpense, NewIncome};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn seeded_storage() -> Storage {
        let storage = Storage::in_memory();
        let incomes = IncomeService::new(&storage, "2024").unwrap();
        let expenses = ExpenseService::new(&storage, "2024").unwrap();

        for (house, month, status) in [
            ("Casa 1", 1, IncomeStatus::Paid),
            ("Casa 2", 1, IncomeStatus::Paid),
            ("Casa 3", 1, IncomeStatus::Pending),
            ("Casa 1", 2, IncomeStatus::Paid),
        ] {
            let mut draft = NewIncome::new("cuota", house, Money::from_units(2500), date(month, 5));
            draft.status = Some(status);
            incomes.create(draft).unwrap();
        }
        let mut fine = NewIncome::new("multa", "Casa 3", Money::from_units(250), date(2, 20));
        fine.status = Some(IncomeStatus::Paid);
        incomes.create(fine).unwrap();

        expenses
            .create(NewExpense {
                date: date(1, 15),
                category: "seguridad".into(),
                description: "Guardia".into(),
                amount: Money::from_units(6000),
                vendor: "Vigilancia SA".into(),
            })
            .unwrap();
        expenses
            .create(NewExpense {
                date: date(2, 3),
                category: "limpieza".into(),
                description: "Limpieza áreas comunes".into(),
                amount: Money::from_units(800),
                vendor: "Limpia Todo".into(),
            })
            .unwrap();
        storage
    }

    #[test]
    fn test_generate_annual_balance() {
        let storage = seeded_storage();
        let balance = AnnualBalance::generate(&storage, "2024").unwrap();

        assert_eq!(balance.months[0].income, Money::from_units(5000));
        assert_eq!(balance.months[0].expenses, Money::from_units(6000));
        assert_eq!(balance.months[0].balance(), Money::from_units(-1000));
        assert_eq!(balance.months[1].income, Money::from_units(2750));
        assert_eq!(balance.collected, Money::from_units(7750));
        assert_eq!(balance.pending, Money::from_units(2500));
        assert_eq!(balance.net_balance(), Money::from_units(950));
        assert_eq!(balance.transactions, 7);
        // 7750 / 10250
        assert_eq!(balance.collection_rate(), Some(76));
        assert_eq!(balance.best_month(), Some("Febrero"));
    }

    #[test]
    fn test_category_totals_sorted_descending() {
        let storage = seeded_storage();
        let balance = AnnualBalance::generate(&storage, "2024").unwrap();

        assert_eq!(
            balance.income_by_category,
            vec![
                ("cuota".to_string(), Money::from_units(7500)),
                ("multa".to_string(), Money::from_units(250)),
            ]
        );
        assert_eq!(balance.expenses_by_category[0].0, "seguridad");
    }

    #[test]
    fn test_empty_year() {
        let balance = AnnualBalance::compute("2030", &[], &[]);

        assert_eq!(balance.collection_rate(), None);
        assert_eq!(balance.best_month(), None);

        let doc = balance.to_document();
        assert_eq!(doc.months.len(), 12);
        assert_eq!(doc.stats.unwrap().transactions, Some(0));
    }

    #[test]
    fn test_export_csv() {
        let storage = seeded_storage();
        let balance = AnnualBalance::generate(&storage, "2024").unwrap();

        let mut out = Vec::new();
        balance.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();

        assert!(csv.starts_with("month,income,expenses,balance\n"));
        assert_eq!(csv.lines().count(), 13);
    }
}
