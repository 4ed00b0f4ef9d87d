//! Audit journal
//!
//! Every write through the record store appends one line to `audit.log`
//! with the record's state before and after the write. `hoa audit` reads
//! the journal back.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::{AuditFilter, AuditLogger};
