//! Monthly financial report

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::format::{amount, clock_time, or_placeholder, short_date};
use crate::models::Money;

pub const DEFAULT_NOTES: &str = "Mes con buen desempeño financiero. Se recomienda mantener el control de gastos y mejorar la tasa de cobranza.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub fees: Option<Money>,
    pub fines: Option<Money>,
    pub events: Option<Money>,
    pub other: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub maintenance: Option<Money>,
    pub services: Option<Money>,
    pub security: Option<Money>,
    pub cleaning: Option<Money>,
    pub gardening: Option<Money>,
    pub administration: Option<Money>,
}

/// Collection figures by house
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_houses: Option<u32>,
    pub up_to_date: Option<u32>,
    pub delinquent: Option<u32>,
    /// Percentage, 0..=100
    pub rate: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projections {
    pub next_month_balance: Option<Money>,
    pub expected_income: Option<Money>,
    pub scheduled_expenses: Option<Money>,
}

/// Input of [`monthly_report_text`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReportData {
    pub period: Option<String>,
    pub generated_by: Option<String>,
    pub income: Option<Money>,
    pub expenses: Option<Money>,
    pub income_breakdown: Option<IncomeBreakdown>,
    pub expense_breakdown: Option<ExpenseBreakdown>,
    pub collection: Option<CollectionStats>,
    pub notes: Option<String>,
    pub projections: Option<Projections>,
}

impl MonthlyReportData {
    /// A report whose breakdowns are estimated from the two totals
    ///
    /// Income splits 85/10/5 into fees, fines and events; expenses split
    /// 35/25/20/12/8 into maintenance, services, security, cleaning and
    /// gardening. Projections carry the balance forward with income up 5%
    /// and expenses down 5%.
    pub fn derived(period: impl Into<String>, income: Money, expenses: Money) -> Self {
        Self {
            period: Some(period.into()),
            generated_by: Some("Sistema Administrativo".to_string()),
            income: Some(income),
            expenses: Some(expenses),
            income_breakdown: Some(IncomeBreakdown {
                fees: Some(income.scale(85, 100)),
                fines: Some(income.scale(10, 100)),
                events: Some(income.scale(5, 100)),
                other: Some(Money::zero()),
            }),
            expense_breakdown: Some(ExpenseBreakdown {
                maintenance: Some(expenses.scale(35, 100)),
                services: Some(expenses.scale(25, 100)),
                security: Some(expenses.scale(20, 100)),
                cleaning: Some(expenses.scale(12, 100)),
                gardening: Some(expenses.scale(8, 100)),
                administration: Some(Money::zero()),
            }),
            collection: Some(CollectionStats {
                total_houses: Some(45),
                up_to_date: Some(38),
                delinquent: Some(7),
                rate: Some(84),
            }),
            notes: Some(DEFAULT_NOTES.to_string()),
            projections: Some(Projections {
                next_month_balance: Some(income - expenses),
                expected_income: Some(income.scale(105, 100)),
                scheduled_expenses: Some(expenses.scale(95, 100)),
            }),
        }
    }

    /// Income minus expenses, missing totals counted as zero
    pub fn net_balance(&self) -> Money {
        self.income.unwrap_or_default() - self.expenses.unwrap_or_default()
    }
}

fn count(value: Option<u32>) -> String {
    value.unwrap_or(0).to_string()
}

/// Render the monthly report generated at `generated`
pub fn monthly_report_text(data: &MonthlyReportData, generated: NaiveDateTime) -> String {
    let date = short_date(generated.date());
    let time = clock_time(generated);
    let income = data.income_breakdown.clone().unwrap_or_default();
    let expense = data.expense_breakdown.clone().unwrap_or_default();
    let stats = data.collection.clone().unwrap_or_default();
    let projections = data.projections.clone().unwrap_or_default();

    format!(
        "REPORTE FINANCIERO MENSUAL
=========================================

INFORMACIÓN GENERAL
---------------------------
Período: {period}
Fecha de Generación: {date} {time}
Generado por: {generated_by}

RESUMEN FINANCIERO
---------------------------
Total Ingresos:          {total_income}
Total Egresos:           {total_expenses}
                        -------------------------
Balance Neto:           {net}

DESGLOSE DE INGRESOS
---------------------------
Cuotas Mensuales:        {fees}
Multas:                  {fines}
Eventos:                 {events}
Otros Ingresos:          {other}

DESGLOSE DE EGRESOS
---------------------------
Mantenimiento:           {maintenance}
Servicios:               {services}
Seguridad:               {security}
Limpieza:                {cleaning}
Jardinería:              {gardening}
Administración:          {administration}

ESTADÍSTICAS DE COBRANZA
---------------------------
Total de Casas:          {houses}
Casas al Día:            {up_to_date}
Casas Morosas:           {delinquent}
Tasa de Cobranza:        {rate}%

OBSERVACIONES
---------------------------
{notes}

PROYECCIONES
---------------------------
Balance Proyectado (Próximo Mes): {next_month}
Ingresos Esperados: {expected}
Gastos Programados: {scheduled}

=========================================
Este reporte ha sido generado automáticamente
por el Sistema de Gestión Vecinal
{date} - {time}",
        period = or_placeholder(data.period.as_deref(), "No especificado"),
        generated_by = or_placeholder(data.generated_by.as_deref(), "Sistema Administrativo"),
        total_income = amount(data.income),
        total_expenses = amount(data.expenses),
        net = amount(Some(data.net_balance())),
        fees = amount(income.fees),
        fines = amount(income.fines),
        events = amount(income.events),
        other = amount(income.other),
        maintenance = amount(expense.maintenance),
        services = amount(expense.services),
        security = amount(expense.security),
        cleaning = amount(expense.cleaning),
        gardening = amount(expense.gardening),
        administration = amount(expense.administration),
        houses = count(stats.total_houses),
        up_to_date = count(stats.up_to_date),
        delinquent = count(stats.delinquent),
        rate = count(stats.rate),
        notes = or_placeholder(
            data.notes.as_deref(),
            "Sin observaciones especiales para este período."
        ),
        next_month = amount(projections.next_month_balance),
        expected = amount(projections.expected_income),
        scheduled = amount(projections.scheduled_expenses),
    )
}
