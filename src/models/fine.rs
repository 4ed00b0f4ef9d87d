//! Fine definitions
//!
//! The catalogue of fines the association can levy. Applying a fine creates
//! an income entry; the definition only carries the default amount.

use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_present, EntityKind, Money, Record, RecordId};
use crate::error::HoaResult;

/// A fine in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineDefinition {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub amount: Money,
    #[serde(default = "default_active")]
    pub active: bool,
    pub category: String,
}

fn default_active() -> bool {
    true
}

impl Record for FineDefinition {
    const KIND: EntityKind = EntityKind::Fine;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn validate(&self) -> HoaResult<()> {
        ensure_present("Fine name", &self.name)?;
        ensure_non_negative("Fine amount", self.amount)
    }
}

/// Input for a new fine definition
#[derive(Debug, Clone)]
pub struct NewFine {
    pub name: String,
    pub description: String,
    pub amount: Money,
    pub active: bool,
    pub category: String,
}

impl NewFine {
    pub(crate) fn into_record(self) -> FineDefinition {
        FineDefinition {
            id: RecordId::unassigned(),
            name: self.name,
            description: self.description,
            amount: self.amount,
            active: self.active,
            category: self.category,
        }
    }
}

/// Partial update of a fine definition
#[derive(Debug, Clone, Default, Serialize)]
pub struct FinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The default fine catalogue
pub fn seed_fines() -> Vec<FineDefinition> {
    [
        (
            "1",
            "Pago Tardío",
            "Multa por pago después de la fecha límite",
            250,
            "Pagos",
        ),
        (
            "2",
            "Ruido Excesivo",
            "Multa por generar ruido después de las 10 PM",
            500,
            "Convivencia",
        ),
        (
            "3",
            "Mal Uso de Áreas Comunes",
            "Multa por no respetar las reglas de áreas comunes",
            300,
            "Áreas Comunes",
        ),
        (
            "4",
            "Mascotas sin Correa",
            "Multa por mascotas sin correa en áreas comunes",
            200,
            "Mascotas",
        ),
        (
            "5",
            "Estacionamiento Indebido",
            "Multa por estacionarse en lugar no asignado",
            400,
            "Estacionamiento",
        ),
    ]
    .into_iter()
    .map(|(id, name, description, amount, category)| FineDefinition {
        id: RecordId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        amount: Money::from_units(amount),
        active: true,
        category: category.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalogue() {
        let fines = seed_fines();
        assert_eq!(fines.len(), 5);
        assert_eq!(fines[0].name, "Pago Tardío");
        assert_eq!(fines[0].amount, Money::from_units(250));
        assert_eq!(fines[4].category, "Estacionamiento");
        assert!(fines.iter().all(|f| f.active));
    }

    #[test]
    fn test_missing_active_defaults_to_true() {
        let json = r#"{"id":"9","name":"X","description":"","amount":100,"category":"Otros"}"#;
        let fine: FineDefinition = serde_json::from_str(json).unwrap();
        assert!(fine.active);
    }
}
