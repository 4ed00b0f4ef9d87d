//! Business logic layer for the HOA back office
//!
//! One service per entity. Income, expense and event services are bound to
//! a fiscal year; the rest are global. Services validate input and delegate
//! persistence to the record store.

pub mod category;
pub mod config;
pub mod event;
pub mod expense;
pub mod fine;
pub mod house;
pub mod income;
pub mod year;

pub use category::CategoryService;
pub use config::ConfigService;
pub use event::EventService;
pub use expense::ExpenseService;
pub use fine::FineService;
pub use house::HouseService;
pub use income::IncomeService;
pub use year::YearService;

use serde::Serialize;

use crate::error::HoaResult;
use crate::models::Record;

/// Uniform CRUD surface over one collection
pub trait Facade {
    type Record: Record;
    /// Input for `create`; carries no id
    type Draft;
    type Patch: Serialize;

    fn get_all(&self) -> HoaResult<Vec<Self::Record>>;

    fn create(&self, draft: Self::Draft) -> HoaResult<Self::Record>;

    fn update(&self, id: &str, patch: &Self::Patch) -> HoaResult<Self::Record>;

    /// Returns whether a record was removed
    fn delete(&self, id: &str) -> HoaResult<bool>;
}
