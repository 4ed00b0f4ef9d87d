//! House records
//!
//! One record per lot in the association, with the owner's contact data used
//! for receipts.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ensure_present, EntityKind, Record, RecordId};
use crate::error::{HoaError, HoaResult};

/// Number of houses seeded on first use
pub const SEEDED_HOUSE_COUNT: u32 = 45;

/// Whether a house is part of the fee roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HouseStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for HouseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HouseStatus::Active => write!(f, "active"),
            HouseStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for HouseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "activa" => Ok(HouseStatus::Active),
            "inactive" | "inactiva" => Ok(HouseStatus::Inactive),
            other => Err(format!("unknown house status '{}'", other)),
        }
    }
}

/// A house in the association
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: RecordId,
    pub number: String,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub status: HouseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl House {
    /// The synthetic record for house `n` used by the seed data
    pub fn seeded(n: u32) -> Self {
        Self {
            id: RecordId::new(n.to_string()),
            number: n.to_string(),
            name: format!("Casa {}", n),
            owner: format!("Propietario {}", n),
            status: HouseStatus::Active,
            email: Some(format!("casa{}@email.com", n)),
            phone: Some(format!("+52 555 {:04}", n)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == HouseStatus::Active
    }
}

impl Record for House {
    const KIND: EntityKind = EntityKind::House;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn validate(&self) -> HoaResult<()> {
        ensure_present("House number", &self.number)?;
        ensure_present("House name", &self.name)
    }

    fn check_conflicts(&self, others: &[Self]) -> HoaResult<()> {
        let number = self.number.trim();
        if others.iter().any(|h| h.number.trim() == number) {
            return Err(HoaError::Validation(format!(
                "House number {} already exists",
                number
            )));
        }
        Ok(())
    }
}

/// Input for a new house
#[derive(Debug, Clone)]
pub struct NewHouse {
    pub number: String,
    pub name: String,
    pub owner: String,
    pub status: HouseStatus,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewHouse {
    pub(crate) fn into_record(self) -> House {
        House {
            id: RecordId::unassigned(),
            number: self.number,
            name: self.name,
            owner: self.owner,
            status: self.status,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Partial update of a house
#[derive(Debug, Clone, Default, Serialize)]
pub struct HousePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HouseStatus>,
    /// `Some(None)` clears the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    /// `Some(None)` clears the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
}

/// The default house roll: houses 1..=45, all active
pub fn seed_houses() -> Vec<House> {
    (1..=SEEDED_HOUSE_COUNT).map(House::seeded).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_house_contact_data() {
        let house = House::seeded(7);
        assert_eq!(house.id, "7");
        assert_eq!(house.name, "Casa 7");
        assert_eq!(house.owner, "Propietario 7");
        assert_eq!(house.email.as_deref(), Some("casa7@email.com"));
        assert_eq!(house.phone.as_deref(), Some("+52 555 0007"));
        assert!(house.is_active());
    }

    #[test]
    fn test_seed_roll() {
        let houses = seed_houses();
        assert_eq!(houses.len(), 45);
        assert_eq!(houses[0].number, "1");
        assert_eq!(houses[44].number, "45");
    }

    #[test]
    fn test_status_parse_accepts_spanish() {
        assert_eq!("inactiva".parse::<HouseStatus>().unwrap(), HouseStatus::Inactive);
    }
}
