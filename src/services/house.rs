//! House service
//!
//! The house roll is seeded with 45 active houses on first use.

use crate::error::{HoaError, HoaResult};
use crate::models::{house::seed_houses, House, HousePatch, NewHouse};
use crate::storage::{keys, Partition, Storage};

use super::Facade;

/// Service for the house roll
pub struct HouseService<'a> {
    storage: &'a Storage,
    partition: Partition<House>,
}

impl<'a> HouseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            partition: Partition::seeded(keys::HOUSES, seed_houses),
        }
    }

    pub fn list(&self) -> HoaResult<Vec<House>> {
        self.storage.records().get_all(&self.partition)
    }

    pub fn get(&self, id: &str) -> HoaResult<House> {
        self.list()?
            .into_iter()
            .find(|h| h.id == *id)
            .ok_or_else(|| HoaError::house_not_found(id))
    }

    /// Find a house by its number
    pub fn find_by_number(&self, number: &str) -> HoaResult<Option<House>> {
        let number = number.trim();
        Ok(self.list()?.into_iter().find(|h| h.number == number))
    }

    /// Find a house by number, id or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> HoaResult<Option<House>> {
        let identifier = identifier.trim();
        let houses = self.list()?;

        if let Some(house) = houses.iter().find(|h| h.number == identifier) {
            return Ok(Some(house.clone()));
        }
        if let Some(house) = houses.iter().find(|h| h.id == *identifier) {
            return Ok(Some(house.clone()));
        }
        Ok(houses
            .into_iter()
            .find(|h| h.name.eq_ignore_ascii_case(identifier)))
    }

    /// Houses on the fee roll
    pub fn active(&self) -> HoaResult<Vec<House>> {
        Ok(self.list()?.into_iter().filter(House::is_active).collect())
    }

    /// Add a house; the number must not already be taken
    pub fn create(&self, draft: NewHouse) -> HoaResult<House> {
        self.storage
            .records()
            .create(&self.partition, draft.into_record())
    }

    /// Change a house; a new number must not belong to another house
    pub fn update(&self, id: &str, patch: &HousePatch) -> HoaResult<House> {
        self.storage.records().update(&self.partition, id, patch)
    }

    pub fn delete(&self, id: &str) -> HoaResult<bool> {
        Ok(self.storage.records().delete(&self.partition, id)?.is_some())
    }
}

impl Facade for HouseService<'_> {
    type Record = House;
    type Draft = NewHouse;
    type Patch = HousePatch;

    fn get_all(&self) -> HoaResult<Vec<House>> {
        self.list()
    }

    fn create(&self, draft: NewHouse) -> HoaResult<House> {
        HouseService::create(self, draft)
    }

    fn update(&self, id: &str, patch: &HousePatch) -> HoaResult<House> {
        HouseService::update(self, id, patch)
    }

    fn delete(&self, id: &str) -> HoaResult<bool> {
        HouseService::delete(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HouseStatus;

    #[test]
    fn test_seeded_roll() {
        let storage = Storage::in_memory();
        let service = HouseService::new(&storage);

        let houses = service.list().unwrap();
        assert_eq!(houses.len(), 45);
        assert!(houses.iter().all(House::is_active));
        let numbers: Vec<String> = houses.iter().map(|h| h.number.clone()).collect();
        let expected: Vec<String> = (1..=45).map(|n| n.to_string()).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_active_filters_inactive() {
        let storage = Storage::in_memory();
        let service = HouseService::new(&storage);

        let patch = HousePatch {
            status: Some(HouseStatus::Inactive),
            ..Default::default()
        };
        service.update("10", &patch).unwrap();

        assert_eq!(service.active().unwrap().len(), 44);
        assert!(!service.get("10").unwrap().is_active());
    }

    #[test]
    fn test_find_by_number_and_name() {
        let storage = Storage::in_memory();
        let service = HouseService::new(&storage);

        assert_eq!(service.find_by_number("7").unwrap().unwrap().name, "Casa 7");
        assert_eq!(service.find("casa 12").unwrap().unwrap().number, "12");
        assert!(service.find_by_number("99").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let storage = Storage::in_memory();
        let service = HouseService::new(&storage);

        let draft = NewHouse {
            number: "3".into(),
            name: "Casa Tres".into(),
            owner: "Ana".into(),
            status: HouseStatus::Active,
            email: None,
            phone: None,
        };
        assert!(service.create(draft).unwrap_err().is_validation());
    }

    #[test]
    fn test_renumbering_onto_taken_number_rejected() {
        let storage = Storage::in_memory();
        let service = HouseService::new(&storage);

        let patch = HousePatch {
            number: Some("1".into()),
            ..Default::default()
        };
        let err = service.update("2", &patch).unwrap_err();
        assert!(err.is_validation());

        let numbered_one = service
            .list()
            .unwrap()
            .into_iter()
            .filter(|h| h.number == "1")
            .count();
        assert_eq!(numbered_one, 1);
        assert_eq!(service.get("2").unwrap().number, "2");
    }

    #[test]
    fn test_update_keeping_own_number() {
        let storage = Storage::in_memory();
        let service = HouseService::new(&storage);

        let patch = HousePatch {
            number: Some("2".into()),
            owner: Some("Marta".into()),
            ..Default::default()
        };
        let house = service.update("2", &patch).unwrap();
        assert_eq!(house.owner, "Marta");

        // renumbering to a free number keeps the house in place
        let patch = HousePatch {
            number: Some("46".into()),
            ..Default::default()
        };
        service.update("2", &patch).unwrap();
        assert_eq!(service.list().unwrap()[1].number, "46");
    }

    #[test]
    fn test_patch_clears_contact_fields() {
        let storage = Storage::in_memory();
        let service = HouseService::new(&storage);

        let patch = HousePatch {
            email: Some(None),
            ..Default::default()
        };
        let house = service.update("5", &patch).unwrap();
        assert_eq!(house.email, None);
        assert_eq!(house.phone.as_deref(), Some("+52 555 0005"));

        // an absent field is left alone, a present one replaces
        let patch = HousePatch {
            phone: Some(Some("+52 555 9999".into())),
            ..Default::default()
        };
        let house = service.update("5", &patch).unwrap();
        assert_eq!(house.email, None);
        assert_eq!(house.phone.as_deref(), Some("+52 555 9999"));
        assert_eq!(service.get("5").unwrap().email, None);
    }

    #[test]
    fn test_added_house_appended() {
        let storage = Storage::in_memory();
        let service = HouseService::new(&storage);

        let created = service
            .create(NewHouse {
                number: "46".into(),
                name: "Casa 46".into(),
                owner: "Luis".into(),
                status: HouseStatus::Active,
                email: Some("casa46@email.com".into()),
                phone: None,
            })
            .unwrap();

        let houses = service.list().unwrap();
        assert_eq!(houses.len(), 46);
        assert_eq!(houses[45].id, created.id);
    }
}
