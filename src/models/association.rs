//! Association-wide settings
//!
//! Two singletons: the association's identity and fee, and the sender
//! identity used for outgoing messages.

use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_present, EntityKind, Money, Singleton};
use crate::error::HoaResult;

/// Identity of the association and its monthly fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationConfig {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub monthly_fee: Money,
    pub currency: String,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            name: "Mi Residencial".to_string(),
            address: "Calle Principal #123".to_string(),
            phone: "+52 555 0000".to_string(),
            email: "admin@miresidencial.com".to_string(),
            monthly_fee: Money::from_units(2500),
            currency: "MXN".to_string(),
        }
    }
}

impl Singleton for AssociationConfig {
    const KIND: EntityKind = EntityKind::AssociationConfig;
    const KEY: &'static str = "association";

    fn initial() -> Self {
        Self::default()
    }

    fn validate(&self) -> HoaResult<()> {
        ensure_present("Association name", &self.name)?;
        ensure_present("Currency", &self.currency)?;
        ensure_non_negative("Monthly fee", self.monthly_fee)
    }
}

/// Partial update of the association settings
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssociationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_fee: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Sender identity for email and WhatsApp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationConfig {
    pub from_email: String,
    pub from_name: String,
    pub whatsapp_number: String,
    /// Appended to every outgoing message
    pub signature: String,
}

impl Default for CommunicationConfig {
    fn default() -> Self {
        Self {
            from_email: "admin@miresidencial.com".to_string(),
            from_name: "Administración Residencial".to_string(),
            whatsapp_number: "+52 555 1234567".to_string(),
            signature: "Saludos cordiales,\nAdministración del Residencial".to_string(),
        }
    }
}

impl Singleton for CommunicationConfig {
    const KIND: EntityKind = EntityKind::CommunicationConfig;
    const KEY: &'static str = "communication";

    fn initial() -> Self {
        Self::default()
    }

    fn validate(&self) -> HoaResult<()> {
        ensure_present("Sender email", &self.from_email)
    }
}

/// Partial update of the communication settings
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommunicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_association_defaults() {
        let config = AssociationConfig::default();
        assert_eq!(config.name, "Mi Residencial");
        assert_eq!(config.monthly_fee, Money::from_units(2500));
        assert_eq!(config.currency, "MXN");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = CommunicationPatch {
            from_name: Some("Mesa Directiva".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"from_name": "Mesa Directiva"}));
    }
}
