//! Reports for the HOA back office
//!
//! Aggregations over stored records that feed the document generator:
//! the annual balance, the monthly report and fee receipts.

pub mod annual;
pub mod monthly;
pub mod receipts;

pub use annual::{AnnualBalance, MonthTotals};
pub use monthly::monthly_report;
pub use receipts::{build_receipt, receipt_for, receipts_for_active};
