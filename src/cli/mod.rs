//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod config;
pub mod directory;
pub mod export;
pub mod ledger;
pub mod report;
pub mod send;
pub mod year;

pub use category::{handle_category_command, CategoryCommands};
pub use config::{
    handle_communication_command, handle_config_command, CommunicationCommands, ConfigCommands,
};
pub use directory::{handle_fine_command, handle_house_command, FineCommands, HouseCommands};
pub use export::{handle_export_command, ExportArgs};
pub use ledger::{
    handle_event_command, handle_expense_command, handle_income_command, EventCommands,
    ExpenseCommands, IncomeCommands,
};
pub use report::{handle_receipt_command, handle_report_command, ReceiptArgs, ReportCommands};
pub use send::{handle_send_command, SendCommands};
pub use year::{handle_year_command, YearCommands};

use chrono::{Datelike, Local, NaiveDate, NaiveTime};

use crate::error::{HoaError, HoaResult};
use crate::models::Money;

/// The fiscal year given on the command line, or the current one
pub(crate) fn year_or_current(year: Option<String>) -> String {
    year.unwrap_or_else(|| Local::now().year().to_string())
}

pub(crate) fn parse_amount(input: &str) -> HoaResult<Money> {
    Money::parse(input).map_err(|e| HoaError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_date(input: &str) -> HoaResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| HoaError::Validation(format!("Invalid date '{}', use YYYY-MM-DD", input)))
}

/// The given date, or today
pub(crate) fn date_or_today(input: Option<&str>) -> HoaResult<NaiveDate> {
    input.map_or_else(|| Ok(Local::now().date_naive()), parse_date)
}

pub(crate) fn parse_time(input: &str) -> HoaResult<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| HoaError::Validation(format!("Invalid time '{}', use HH:MM", input)))
}

pub(crate) fn parse_with<T: std::str::FromStr<Err = String>>(input: &str) -> HoaResult<T> {
    input.parse().map_err(HoaError::Validation)
}

pub(crate) fn parse_month(input: &str) -> HoaResult<u32> {
    crate::documents::format::parse_month(input)
        .ok_or_else(|| HoaError::Validation(format!("Invalid month '{}'", input)))
}

/// A value for a clearable field; an empty value clears it
pub(crate) fn clearable(input: Option<String>) -> Option<Option<String>> {
    input.map(|value| Some(value).filter(|v| !v.trim().is_empty()))
}

/// The given month, or the current one
pub(crate) fn month_or_current(input: Option<&str>) -> HoaResult<u32> {
    input.map_or_else(|| Ok(Local::now().month()), parse_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("2500").unwrap(), Money::from_units(2500));
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert_eq!(
            parse_date("2024-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert!(parse_date("05/01/2024").is_err());
        assert!(parse_time("18:30").is_ok());
        assert_eq!(parse_month("Febrero").unwrap(), 2);
        assert!(parse_month("13").is_err());
        assert_eq!(year_or_current(Some("2023".into())), "2023");
    }

    #[test]
    fn test_clearable() {
        assert_eq!(clearable(None), None);
        assert_eq!(clearable(Some("  ".into())), Some(None));
        assert_eq!(
            clearable(Some("casa5@email.com".into())),
            Some(Some("casa5@email.com".to_string()))
        );
    }
}
