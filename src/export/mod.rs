//! Export of a fiscal year
//!
//! - CSV: income and expense entries as spreadsheet rows
//! - JSON: machine-readable snapshot of the year
//! - YAML: human-readable snapshot of the year

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_ledger_csv;
pub use json::{export_year_json, YearExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_year_yaml;
