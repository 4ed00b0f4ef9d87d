//! Fiscal-year index

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use super::{EntityKind, Singleton};
use crate::error::{HoaError, HoaResult};

/// First year of the seeded index
pub const FIRST_SEEDED_YEAR: i32 = 2020;

/// Check that a year string is exactly four ASCII digits
pub fn validate_year(year: &str) -> HoaResult<()> {
    if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(HoaError::Validation(format!(
            "Year must be four digits (got '{}')",
            year
        )))
    }
}

/// The known fiscal years, unique and newest first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearIndex(Vec<String>);

impl YearIndex {
    /// 2020 through next year
    pub fn seeded() -> Self {
        Self::seeded_until(Local::now().year() + 1)
    }

    pub fn seeded_until(last: i32) -> Self {
        Self((FIRST_SEEDED_YEAR..=last).rev().map(|y| y.to_string()).collect())
    }

    pub fn years(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, year: &str) -> bool {
        self.0.iter().any(|y| y == year)
    }

    /// Add a year, keeping the index unique and sorted. Returns false if it was already present.
    pub fn insert(&mut self, year: &str) -> HoaResult<bool> {
        validate_year(year)?;
        if self.contains(year) {
            return Ok(false);
        }
        self.0.push(year.to_string());
        self.normalize();
        Ok(true)
    }

    /// Remove a year. Returns false if it was not present.
    pub fn remove(&mut self, year: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|y| y != year);
        self.0.len() != before
    }

    /// Restore ordering and uniqueness after loading a hand-edited file
    pub fn normalize(&mut self) {
        self.0.sort_by(|a, b| {
            let a_num = a.parse::<u32>().unwrap_or(0);
            let b_num = b.parse::<u32>().unwrap_or(0);
            b_num.cmp(&a_num)
        });
        self.0.dedup();
    }
}

impl Singleton for YearIndex {
    const KIND: EntityKind = EntityKind::YearIndex;
    const KEY: &'static str = "years";

    fn initial() -> Self {
        Self::seeded()
    }

    fn validate(&self) -> HoaResult<()> {
        self.0.iter().try_for_each(|year| validate_year(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_year() {
        assert!(validate_year("2024").is_ok());
        assert!(validate_year("24").is_err());
        assert!(validate_year("20a4").is_err());
        assert!(validate_year("../x").is_err());
    }

    #[test]
    fn test_seeded_is_descending() {
        let index = YearIndex::seeded_until(2025);
        assert_eq!(index.years(), ["2025", "2024", "2023", "2022", "2021", "2020"]);
    }

    #[test]
    fn test_insert_keeps_order_and_uniqueness() {
        let mut index = YearIndex::seeded_until(2022);
        assert!(index.insert("2030").unwrap());
        assert!(!index.insert("2021").unwrap());
        assert!(index.insert("2019").unwrap());
        assert_eq!(index.years(), ["2030", "2022", "2021", "2020", "2019"]);
        assert!(index.insert("abcd").is_err());
    }

    #[test]
    fn test_remove() {
        let mut index = YearIndex::seeded_until(2021);
        assert!(index.remove("2020"));
        assert!(!index.remove("2020"));
        assert_eq!(index.years(), ["2021"]);
    }
}
