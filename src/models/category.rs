//! Income and expense categories
//!
//! Categories are kept as two independent lists. Ledger entries copy the
//! category id as plain text when they are created, so removing a category
//! never touches existing entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ensure_present, EntityKind, Record, RecordId};
use crate::error::{HoaError, HoaResult};

/// Which of the two lists a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    /// Storage key of the list
    pub const fn storage_key(&self) -> &'static str {
        match self {
            CategoryKind::Income => "categories_income",
            CategoryKind::Expense => "categories_expense",
        }
    }

    /// The ids seeded for this list, which cannot be deleted
    pub const fn protected_ids(&self) -> &'static [&'static str] {
        match self {
            CategoryKind::Income => &["cuota", "multa", "evento", "otro"],
            CategoryKind::Expense => &[
                "mantenimiento",
                "servicios",
                "limpieza",
                "seguridad",
                "jardineria",
                "administracion",
            ],
        }
    }

    pub fn is_protected(&self, id: &str) -> bool {
        self.protected_ids().contains(&id)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Income => write!(f, "income"),
            CategoryKind::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "ingreso" | "ingresos" => Ok(CategoryKind::Income),
            "expense" | "expenses" | "egreso" | "egresos" => Ok(CategoryKind::Expense),
            other => Err(format!("unknown category kind '{}'", other)),
        }
    }
}

/// A category in one of the two lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display color as a CSS hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Record for Category {
    const KIND: EntityKind = EntityKind::Category;
    const ID_PREFIX: &'static str = "custom-";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn validate(&self) -> HoaResult<()> {
        ensure_present("Category name", &self.name)?;
        if let Some(color) = &self.color {
            let hex = color.strip_prefix('#').unwrap_or("");
            if !(hex.len() == 6 || hex.len() == 3) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(HoaError::Validation(format!(
                    "Category color must be a hex color like #22c55e (got '{}')",
                    color
                )));
            }
        }
        Ok(())
    }

    fn check_conflicts(&self, others: &[Self]) -> HoaResult<()> {
        let name = self.name.trim();
        if others.iter().any(|c| c.name.trim().eq_ignore_ascii_case(name)) {
            return Err(HoaError::Validation(format!(
                "A category named '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

/// Input for a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub active: bool,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: None,
            active: true,
        }
    }

    pub(crate) fn into_record(self) -> Category {
        Category {
            id: RecordId::unassigned(),
            name: self.name,
            description: self.description,
            color: self.color,
            active: self.active,
        }
    }
}

/// Partial update of a category
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// `Some(None)` clears the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

fn seeded(id: &str, name: &str, description: &str, color: &str) -> Category {
    Category {
        id: RecordId::new(id),
        name: name.to_string(),
        description: Some(description.to_string()),
        color: Some(color.to_string()),
        active: true,
    }
}

/// The default list for a kind
pub fn seed_categories(kind: CategoryKind) -> Vec<Category> {
    match kind {
        CategoryKind::Income => vec![
            seeded("cuota", "Cuota Mensual", "Cuotas mensuales de mantenimiento", "#22c55e"),
            seeded("multa", "Multa", "Multas por pagos tardíos", "#ef4444"),
            seeded("evento", "Evento", "Ingresos por eventos especiales", "#3b82f6"),
            seeded("otro", "Otro", "Otros ingresos diversos", "#8b5cf6"),
        ],
        CategoryKind::Expense => vec![
            seeded("mantenimiento", "Mantenimiento", "Reparaciones y mantenimiento general", "#ef4444"),
            seeded("servicios", "Servicios", "Servicios públicos y utilities", "#f97316"),
            seeded("limpieza", "Limpieza", "Servicios de limpieza", "#22c55e"),
            seeded("seguridad", "Seguridad", "Servicios de seguridad", "#eab308"),
            seeded("jardineria", "Jardinería", "Mantenimiento de áreas verdes", "#3b82f6"),
            seeded("administracion", "Administración", "Gastos administrativos", "#8b5cf6"),
        ],
    }
}
