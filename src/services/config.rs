//! Association and communication settings

use crate::error::HoaResult;
use crate::models::{AssociationConfig, AssociationPatch, CommunicationConfig, CommunicationPatch};
use crate::storage::Storage;

/// Service for the two settings singletons
pub struct ConfigService<'a> {
    storage: &'a Storage,
}

impl<'a> ConfigService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn association(&self) -> HoaResult<AssociationConfig> {
        self.storage.records().singleton()
    }

    pub fn update_association(&self, patch: &AssociationPatch) -> HoaResult<AssociationConfig> {
        self.storage.records().update_singleton(patch)
    }

    pub fn communication(&self) -> HoaResult<CommunicationConfig> {
        self.storage.records().singleton()
    }

    pub fn update_communication(
        &self,
        patch: &CommunicationPatch,
    ) -> HoaResult<CommunicationConfig> {
        self.storage.records().update_singleton(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_defaults() {
        let storage = Storage::in_memory();
        let service = ConfigService::new(&storage);

        assert_eq!(service.association().unwrap().currency, "MXN");
        assert_eq!(
            service.communication().unwrap().from_name,
            "Administración Residencial"
        );
    }

    #[test]
    fn test_update_association() {
        let storage = Storage::in_memory();
        let service = ConfigService::new(&storage);

        let patch = AssociationPatch {
            name: Some("Residencial Los Pinos".into()),
            monthly_fee: Some(Money::from_units(2800)),
            ..Default::default()
        };
        service.update_association(&patch).unwrap();

        let config = service.association().unwrap();
        assert_eq!(config.name, "Residencial Los Pinos");
        assert_eq!(config.monthly_fee, Money::from_units(2800));
        assert_eq!(config.address, "Calle Principal #123");
    }

    #[test]
    fn test_invalid_update_rejected() {
        let storage = Storage::in_memory();
        let service = ConfigService::new(&storage);

        let patch = CommunicationPatch {
            from_email: Some(String::new()),
            ..Default::default()
        };
        assert!(service.update_communication(&patch).unwrap_err().is_validation());
        assert_eq!(
            service.communication().unwrap().from_email,
            "admin@miresidencial.com"
        );
    }
}
