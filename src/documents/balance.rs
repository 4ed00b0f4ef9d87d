//! Annual balance

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::format::{amount, clock_time, or_placeholder, short_date};
use crate::models::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month: String,
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceStats {
    /// Average collection rate, percent
    pub collection_rate: Option<u32>,
    pub best_month: Option<String>,
    pub transactions: Option<usize>,
}

/// Input of [`annual_balance_text`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualBalanceData {
    pub year: Option<String>,
    pub total_income: Option<Money>,
    pub total_expenses: Option<Money>,
    #[serde(default)]
    pub months: Vec<MonthRow>,
    #[serde(default)]
    pub income_by_category: Vec<CategoryTotal>,
    #[serde(default)]
    pub expenses_by_category: Vec<CategoryTotal>,
    pub stats: Option<BalanceStats>,
    pub notes: Option<String>,
}

fn lines_or<T>(items: &[T], render: impl Fn(&T) -> String, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items.iter().map(render).collect::<Vec<_>>().join("\n")
}

fn category_line(total: &CategoryTotal) -> String {
    format!("{}: {}", total.category, amount(Some(total.total)))
}

/// Render the annual balance generated at `generated`
pub fn annual_balance_text(data: &AnnualBalanceData, generated: NaiveDateTime) -> String {
    let date = short_date(generated.date());
    let time = clock_time(generated);
    let net = data.total_income.unwrap_or_default() - data.total_expenses.unwrap_or_default();
    let stats = data.stats.clone().unwrap_or_default();

    let months = lines_or(
        &data.months,
        |row| {
            format!(
                "{}: Ingresos {} | Egresos {} | Balance {}",
                row.month,
                amount(Some(row.income)),
                amount(Some(row.expenses)),
                amount(Some(row.balance))
            )
        },
        "No hay datos mensuales disponibles",
    );
    let income_categories = lines_or(
        &data.income_by_category,
        category_line,
        "No hay datos de categorías de ingresos",
    );
    let expense_categories = lines_or(
        &data.expenses_by_category,
        category_line,
        "No hay datos de categorías de egresos",
    );

    format!(
        "BALANCE ANUAL
=========================================

INFORMACIÓN GENERAL
---------------------------
Año: {year}
Fecha de Generación: {date} {time}
Generado por: Sistema de Gestión Vecinal

RESUMEN ANUAL
---------------------------
Total Ingresos del Año:  {income}
Total Egresos del Año:   {expenses}
                        -------------------------
Balance Neto Anual:     {net}

DESGLOSE MENSUAL
---------------------------
{months}

INGRESOS POR CATEGORÍA
---------------------------
{income_categories}

EGRESOS POR CATEGORÍA
---------------------------
{expense_categories}

ESTADÍSTICAS DE COBRANZA
---------------------------
Promedio de Cobranza: {rate}%
Mejor Mes: {best}
Total de Transacciones: {transactions}

OBSERVACIONES
---------------------------
{notes}

=========================================
Documento generado automáticamente
{date} - {time}",
        year = or_placeholder(data.year.as_deref(), "No especificado"),
        income = amount(data.total_income),
        expenses = amount(data.total_expenses),
        net = amount(Some(net)),
        rate = stats.collection_rate.unwrap_or(0),
        best = or_placeholder(stats.best_month.as_deref(), "N/A"),
        transactions = stats.transactions.unwrap_or(0),
        notes = or_placeholder(data.notes.as_deref(), "Balance anual generado automáticamente."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_balance_placeholders() {
        let text = annual_balance_text(&AnnualBalanceData::default(), generated());

        assert!(text.contains("Año: No especificado\n"));
        assert!(text.contains("No hay datos mensuales disponibles\n"));
        assert!(text.contains("No hay datos de categorías de ingresos\n"));
        assert!(text.contains("No hay datos de categorías de egresos\n"));
        assert!(text.contains("Promedio de Cobranza: 0%\n"));
        assert!(text.contains("Mejor Mes: N/A\n"));
        assert!(text.contains("Balance anual generado automáticamente."));
        assert!(text.ends_with("31/12/2024 - 09:00:00"));
    }

    #[test]
    fn test_rows_render() {
        let data = AnnualBalanceData {
            year: Some("2024".into()),
            total_income: Some(Money::from_units(5000)),
            total_expenses: Some(Money::from_units(1200)),
            months: vec![MonthRow {
                month: "Enero".into(),
                income: Money::from_units(5000),
                expenses: Money::from_units(1200),
                balance: Money::from_units(3800),
            }],
            income_by_category: vec![CategoryTotal {
                category: "cuota".into(),
                total: Money::from_units(5000),
            }],
            expenses_by_category: vec![],
            stats: Some(BalanceStats {
                collection_rate: Some(100),
                best_month: Some("Enero".into()),
                transactions: Some(3),
            }),
            notes: None,
        };
        let text = annual_balance_text(&data, generated());

        assert!(text.contains("Balance Neto Anual:     $3,800\n"));
        assert!(text.contains("Enero: Ingresos $5,000 | Egresos $1,200 | Balance $3,800\n"));
        assert!(text.contains("cuota: $5,000\n"));
        assert!(text.contains("Total de Transacciones: 3\n"));
    }
}
