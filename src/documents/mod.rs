//! Plain-text documents: receipts, the monthly report and the annual balance
//!
//! Every generator is a pure function of its data and the issue time, so
//! the output is reproducible. Absent optional fields render placeholders.

pub mod balance;
pub mod format;
pub mod receipt;
pub mod report;

pub use balance::{annual_balance_text, AnnualBalanceData, BalanceStats, CategoryTotal, MonthRow};
pub use receipt::{bulk_receipts_text, receipt_text, AssociationInfo, ReceiptData};
pub use report::{
    monthly_report_text, CollectionStats, ExpenseBreakdown, IncomeBreakdown, MonthlyReportData,
    Projections,
};
