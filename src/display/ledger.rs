//! Income, expense and event tables

use super::{render_table, Align};
use crate::models::{EventRecord, ExpenseRecord, IncomeRecord, Money};

pub fn format_income_list(incomes: &[IncomeRecord]) -> String {
    if incomes.is_empty() {
        return "No income entries found.".to_string();
    }

    let rows: Vec<Vec<String>> = incomes
        .iter()
        .map(|i| {
            vec![
                i.id.to_string(),
                i.date.to_string(),
                i.kind.clone(),
                i.house.clone(),
                i.amount.to_string(),
                i.status.to_string(),
            ]
        })
        .collect();

    let mut output = render_table(
        &[
            ("ID", Align::Left),
            ("Date", Align::Left),
            ("Type", Align::Left),
            ("House", Align::Left),
            ("Amount", Align::Right),
            ("Status", Align::Left),
        ],
        &rows,
    );
    let total: Money = incomes.iter().map(|i| i.amount).sum();
    output.push_str(&format!("\n{} entries, total {}\n", incomes.len(), total));
    output
}

pub fn format_expense_list(expenses: &[ExpenseRecord]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows: Vec<Vec<String>> = expenses
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.date.to_string(),
                e.category.clone(),
                e.vendor.clone(),
                e.description.clone(),
                e.amount.to_string(),
            ]
        })
        .collect();

    let mut output = render_table(
        &[
            ("ID", Align::Left),
            ("Date", Align::Left),
            ("Category", Align::Left),
            ("Vendor", Align::Left),
            ("Description", Align::Left),
            ("Amount", Align::Right),
        ],
        &rows,
    );
    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!("\n{} entries, total {}\n", expenses.len(), total));
    output
}

pub fn format_event_list(events: &[EventRecord]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }

    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.date.to_string(),
                e.time.format("%H:%M").to_string(),
                e.title.clone(),
                e.place.clone(),
                e.attendee_count.to_string(),
                e.status.to_string(),
            ]
        })
        .collect();

    render_table(
        &[
            ("ID", Align::Left),
            ("Date", Align::Left),
            ("Time", Align::Left),
            ("Title", Align::Left),
            ("Place", Align::Left),
            ("Attendees", Align::Right),
            ("Status", Align::Left),
        ],
        &rows,
    )
}
