//! Income, expense and event CLI commands

use clap::Subcommand;

use super::{
    clearable, date_or_today, parse_amount, parse_date, parse_time, parse_with, year_or_current,
};
use crate::display::{format_event_list, format_expense_list, format_income_list};
use crate::error::HoaResult;
use crate::models::{EventPatch, ExpensePatch, IncomePatch, NewEvent, NewExpense, NewIncome};
use crate::services::{EventService, ExpenseService, IncomeService};
use crate::state::DataHandle;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// List the year's income entries
    List {
        #[arg(short, long)]
        year: Option<String>,
        /// Only entries of this house
        #[arg(long)]
        house: Option<String>,
    },

    /// Record an income entry
    Add {
        /// Income type (category id, e.g. "cuota")
        kind: String,
        /// House the money comes from
        house: String,
        /// Amount (e.g., "2500" or "2500.00")
        amount: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// pending or paid
        #[arg(short, long)]
        status: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Change fields of an income entry
    Edit {
        id: String,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        house: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// New description; an empty value clears it
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Mark an income entry as paid
    Pay {
        id: String,
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Delete an income entry
    Delete {
        id: String,
        #[arg(short, long)]
        year: Option<String>,
    },
}

pub fn handle_income_command(storage: &Storage, cmd: IncomeCommands) -> HoaResult<()> {
    match cmd {
        IncomeCommands::List { year, house } => {
            let service = IncomeService::new(storage, &year_or_current(year))?;
            let incomes = match house {
                Some(house) => service.for_house(&house)?,
                None => service.list()?,
            };
            println!("{}", format_income_list(&incomes));
            let (paid, pending) = service.totals()?;
            println!("Paid: {}  Pending: {}", paid, pending);
        }

        IncomeCommands::Add {
            kind,
            house,
            amount,
            date,
            status,
            description,
            year,
        } => {
            let service = IncomeService::new(storage, &year_or_current(year))?;
            let mut draft = NewIncome::new(
                kind,
                house,
                parse_amount(&amount)?,
                date_or_today(date.as_deref())?,
            );
            draft.status = status.as_deref().map(parse_with).transpose()?;
            draft.description = description;

            let mut handle = DataHandle::new(service);
            let income = handle.create(draft)?;
            println!(
                "Recorded {} {} from {} ({}) with id {}",
                income.kind, income.amount, income.house, income.status, income.id
            );
        }

        IncomeCommands::Edit {
            id,
            kind,
            house,
            amount,
            date,
            status,
            description,
            year,
        } => {
            let patch = IncomePatch {
                date: date.as_deref().map(parse_date).transpose()?,
                kind,
                house,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                status: status.as_deref().map(parse_with).transpose()?,
                description: clearable(description),
            };
            let service = IncomeService::new(storage, &year_or_current(year))?;
            let income = DataHandle::new(service).update(&id, &patch)?;
            println!("Updated income {}: {} {}", income.id, income.amount, income.status);
        }

        IncomeCommands::Pay { id, year } => {
            let service = IncomeService::new(storage, &year_or_current(year))?;
            let income = service.mark_paid(&id)?;
            println!("Marked {} from {} as paid", income.amount, income.house);
        }

        IncomeCommands::Delete { id, year } => {
            let service = IncomeService::new(storage, &year_or_current(year))?;
            report_delete("income entry", &id, DataHandle::new(service).delete(&id)?);
        }
    }

    Ok(())
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List the year's expenses
    List {
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Record an expense
    Add {
        /// Expense category id (e.g. "mantenimiento")
        category: String,
        /// Amount (e.g., "1200" or "1200.50")
        amount: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        vendor: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Change fields of an expense
    Edit {
        id: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Delete an expense
    Delete {
        id: String,
        #[arg(short, long)]
        year: Option<String>,
    },
}

pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> HoaResult<()> {
    match cmd {
        ExpenseCommands::List { year } => {
            let service = ExpenseService::new(storage, &year_or_current(year))?;
            println!("{}", format_expense_list(&service.list()?));
            let totals = service.totals_by_category()?;
            if !totals.is_empty() {
                println!("By category:");
                for (category, total) in totals {
                    println!("  {:<16} {:>14}", category, total.to_string());
                }
            }
        }

        ExpenseCommands::Add {
            category,
            amount,
            description,
            vendor,
            date,
            year,
        } => {
            let service = ExpenseService::new(storage, &year_or_current(year))?;
            let draft = NewExpense {
                date: date_or_today(date.as_deref())?,
                category,
                description,
                amount: parse_amount(&amount)?,
                vendor,
            };
            let expense = DataHandle::new(service).create(draft)?;
            println!(
                "Recorded {} to {} ({}) with id {}",
                expense.amount, expense.vendor, expense.category, expense.id
            );
        }

        ExpenseCommands::Edit {
            id,
            category,
            amount,
            description,
            vendor,
            date,
            year,
        } => {
            let patch = ExpensePatch {
                date: date.as_deref().map(parse_date).transpose()?,
                category,
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                vendor,
            };
            let service = ExpenseService::new(storage, &year_or_current(year))?;
            let expense = DataHandle::new(service).update(&id, &patch)?;
            println!("Updated expense {}: {}", expense.id, expense.amount);
        }

        ExpenseCommands::Delete { id, year } => {
            let service = ExpenseService::new(storage, &year_or_current(year))?;
            report_delete("expense", &id, DataHandle::new(service).delete(&id)?);
        }
    }

    Ok(())
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// List the year's events
    List {
        #[arg(short, long)]
        year: Option<String>,
        /// Only pending or confirmed events from today on
        #[arg(long)]
        upcoming: bool,
    },

    /// Schedule an event
    Add {
        title: String,
        /// Date (YYYY-MM-DD)
        date: String,
        /// Time (HH:MM)
        time: String,
        #[arg(long)]
        place: String,
        /// Event type (e.g. "asamblea")
        #[arg(long, default_value = "general")]
        kind: String,
        #[arg(long, default_value_t = 0)]
        attendees: u32,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Change fields of an event
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        place: Option<String>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        attendees: Option<u32>,
        #[arg(long)]
        status: Option<String>,
        /// New description; an empty value clears it
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Delete an event
    Delete {
        id: String,
        #[arg(short, long)]
        year: Option<String>,
    },
}

pub fn handle_event_command(storage: &Storage, cmd: EventCommands) -> HoaResult<()> {
    match cmd {
        EventCommands::List { year, upcoming } => {
            let service = EventService::new(storage, &year_or_current(year))?;
            let events = if upcoming {
                service.upcoming(chrono::Local::now().date_naive())?
            } else {
                service.list()?
            };
            println!("{}", format_event_list(&events));
        }

        EventCommands::Add {
            title,
            date,
            time,
            place,
            kind,
            attendees,
            status,
            description,
            year,
        } => {
            let date = parse_date(&date)?;
            // events land in the year they happen unless told otherwise
            let year = year.unwrap_or_else(|| chrono::Datelike::year(&date).to_string());
            let service = EventService::new(storage, &year)?;
            let draft = NewEvent {
                title,
                date,
                time: parse_time(&time)?,
                place,
                kind,
                attendee_count: attendees,
                status: status.as_deref().map(parse_with).transpose()?,
                description,
            };
            let event = DataHandle::new(service).create(draft)?;
            println!(
                "Scheduled '{}' on {} at {} ({}) with id {}",
                event.title,
                event.date,
                event.time.format("%H:%M"),
                event.status,
                event.id
            );
        }

        EventCommands::Edit {
            id,
            title,
            date,
            time,
            place,
            kind,
            attendees,
            status,
            description,
            year,
        } => {
            let patch = EventPatch {
                title,
                date: date.as_deref().map(parse_date).transpose()?,
                time: time.as_deref().map(parse_time).transpose()?,
                place,
                kind,
                attendee_count: attendees,
                status: status.as_deref().map(parse_with).transpose()?,
                description: clearable(description),
            };
            let service = EventService::new(storage, &year_or_current(year))?;
            let event = DataHandle::new(service).update(&id, &patch)?;
            println!("Updated event {}: {} ({})", event.id, event.title, event.status);
        }

        EventCommands::Delete { id, year } => {
            let service = EventService::new(storage, &year_or_current(year))?;
            report_delete("event", &id, DataHandle::new(service).delete(&id)?);
        }
    }

    Ok(())
}

pub(crate) fn report_delete(what: &str, id: &str, removed: bool) {
    if removed {
        println!("Deleted {} {}", what, id);
    } else {
        println!("No {} with id {}; nothing deleted", what, id);
    }
}
