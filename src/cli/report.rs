//! Receipt and report CLI commands
//!
//! Documents print to stdout or are written to a file.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Subcommand};

use super::{month_or_current, year_or_current};
use crate::documents::{
    annual_balance_text, bulk_receipts_text, monthly_report_text, receipt_text, MonthlyReportData,
};
use crate::error::{HoaError, HoaResult};
use crate::models::Money;
use crate::reports::{monthly_report, receipt_for, receipts_for_active, AnnualBalance};
use crate::storage::Storage;

#[derive(Args)]
pub struct ReceiptArgs {
    /// House number, id or name; omit with --all-active
    pub house: Option<String>,
    /// Month name or number, defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,
    #[arg(short, long)]
    pub year: Option<String>,
    /// One document with receipts for every active house
    #[arg(long)]
    pub all_active: bool,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Monthly financial report
    Monthly {
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
        /// Estimate the breakdowns from these totals instead of the ledger
        #[arg(long, requires = "expenses")]
        income: Option<String>,
        #[arg(long, requires = "income")]
        expenses: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Annual balance
    Annual {
        #[arg(short, long)]
        year: Option<String>,
        /// Monthly rows as CSV instead of the document
        #[arg(long)]
        csv: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn emit(text: &str, output: Option<PathBuf>) -> HoaResult<()> {
    match output {
        Some(path) => {
            fs::write(&path, text)
                .map_err(|e| HoaError::Export(format!("{}: {}", path.display(), e)))?;
            println!("Written to {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

pub fn handle_receipt_command(storage: &Storage, args: ReceiptArgs) -> HoaResult<()> {
    let year = year_or_current(args.year);
    let month = month_or_current(args.month.as_deref())?;
    let issued = Local::now().date_naive();

    let text = match (args.house, args.all_active) {
        (_, true) => bulk_receipts_text(&receipts_for_active(storage, &year, month)?, issued),
        (Some(house), false) => receipt_text(&receipt_for(storage, &house, &year, month)?, issued),
        (None, false) => {
            return Err(HoaError::Validation(
                "Give a house or use --all-active".into(),
            ))
        }
    };
    emit(&text, args.output)
}

pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> HoaResult<()> {
    let now = Local::now().naive_local();

    match cmd {
        ReportCommands::Monthly {
            month,
            year,
            income,
            expenses,
            output,
        } => {
            let year = year_or_current(year);
            let month = month_or_current(month.as_deref())?;
            let data = match (income, expenses) {
                (Some(income), Some(expenses)) => {
                    let period = format!(
                        "{} {}",
                        crate::documents::format::month_name(month).unwrap_or_default(),
                        year
                    );
                    MonthlyReportData::derived(
                        period,
                        parse_total(&income)?,
                        parse_total(&expenses)?,
                    )
                }
                _ => monthly_report(storage, &year, month)?,
            };
            emit(&monthly_report_text(&data, now), output)
        }

        ReportCommands::Annual { year, csv, output } => {
            let balance = AnnualBalance::generate(storage, &year_or_current(year))?;
            if csv {
                let mut buffer = Vec::new();
                balance.export_csv(&mut buffer)?;
                emit(String::from_utf8_lossy(&buffer).trim_end(), output)
            } else {
                emit(&annual_balance_text(&balance.to_document(), now), output)
            }
        }
    }
}

fn parse_total(input: &str) -> HoaResult<Money> {
    super::parse_amount(input)
}
