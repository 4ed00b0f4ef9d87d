//! Back office for a residential neighborhood association
//!
//! Tracks the income and expense ledger per fiscal year, the house
//! directory, the fine catalog and community events. Prints receipts,
//! monthly reports and annual balances as plain text, and sends receipts
//! and notices by email or WhatsApp through a small HTTP relay.
//!
//! # Architecture
//!
//! - `storage`: key-value port, record store with simulated latency
//! - `models`: records, drafts and patches
//! - `services`: one facade per collection
//! - `state`: `{data, loading, error}` holders for views
//! - `documents`: text renderers for receipts and reports
//! - `reports`: aggregation of ledger data into documents
//! - `messaging`: email and WhatsApp senders over a transport
//! - `relay`: the HTTP relay and its provider clients
//! - `export`: CSV, JSON and YAML year exports
//! - `audit`: append-only change journal
//!
//! # Example
//!
//! ```rust,ignore
//! use hoa::services::HouseService;
//! use hoa::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! let houses = HouseService::new(&storage).active()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod documents;
pub mod error;
pub mod export;
pub mod messaging;
pub mod models;
pub mod relay;
pub mod reports;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{HoaError, HoaResult};
