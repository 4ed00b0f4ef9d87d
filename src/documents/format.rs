//! Spanish formatting shared by the documents and messages

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::models::Money;

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Spanish name of month `1..=12`
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Month number of a Spanish or numeric month name
pub fn parse_month(input: &str) -> Option<u32> {
    let input = input.trim();
    if let Ok(n) = input.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(input))
        .map(|i| i as u32 + 1)
}

/// `$2,500`, or `$0` when absent
pub fn amount(value: Option<Money>) -> String {
    format!("${}", value.map(|m| m.grouped()).unwrap_or_else(|| "0".to_string()))
}

/// Short date the way Mexican Spanish writes it: `5/1/2024`
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

pub fn clock_time(at: NaiveDateTime) -> String {
    at.format("%H:%M:%S").to_string()
}

/// `value` when present and not blank, otherwise `placeholder`
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("Enero"));
        assert_eq!(month_name(12), Some("Diciembre"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(parse_month("marzo"), Some(3));
        assert_eq!(parse_month("11"), Some(11));
        assert_eq!(parse_month("13"), None);
    }

    #[test]
    fn test_amount() {
        assert_eq!(amount(Some(Money::from_units(2500))), "$2,500");
        assert_eq!(amount(Some(Money::from_cents(212_550))), "$2,125.50");
        assert_eq!(amount(None), "$0");
    }

    #[test]
    fn test_short_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(short_date(date), "5/1/2024");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(or_placeholder(Some("x"), "No especificado"), "x");
        assert_eq!(or_placeholder(Some(" "), "No especificado"), "No especificado");
        assert_eq!(or_placeholder(None, "No especificado"), "No especificado");
    }
}
