//! Export command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::year_or_current;
use crate::error::{HoaError, HoaResult};
use crate::export::{export_ledger_csv, export_year_json, export_year_yaml};
use crate::storage::Storage;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    /// Flat ledger of income and expenses
    Csv,
    /// Full year snapshot
    Json,
    Yaml,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,
    #[arg(short, long)]
    pub year: Option<String>,
    /// Output file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> HoaResult<()> {
    let year = year_or_current(args.year);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            HoaError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv => export_ledger_csv(storage, &year, &mut writer)?,
        ExportFormat::Json => export_year_json(storage, &year, &mut writer, true)?,
        ExportFormat::Yaml => export_year_yaml(storage, &year, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| HoaError::Export(format!("Failed to write export: {}", e)))?;

    if let Some(path) = args.output {
        eprintln!("Exported {} to {}", year, path.display());
    }
    Ok(())
}
