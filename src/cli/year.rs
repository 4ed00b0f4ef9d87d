//! Fiscal-year CLI commands

use clap::Subcommand;

use crate::error::HoaResult;
use crate::services::YearService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum YearCommands {
    /// List fiscal years, newest first
    List,

    /// Add a fiscal year
    Add { year: String },

    /// Remove a year from the list; its entries stay unless purged
    Remove {
        year: String,
        /// Also delete the year's income, expenses and events
        #[arg(long)]
        purge: bool,
    },
}

pub fn handle_year_command(storage: &Storage, cmd: YearCommands) -> HoaResult<()> {
    let service = YearService::new(storage);

    match cmd {
        YearCommands::List => {
            for year in service.list()? {
                println!("{}", year);
            }
        }

        YearCommands::Add { year } => {
            if service.add(&year)? {
                println!("Added year {}", year);
            } else {
                println!("Year {} already exists", year);
            }
        }

        YearCommands::Remove { year, purge } => {
            let removed = if purge {
                service.purge(&year)?
            } else {
                service.remove(&year)?
            };
            match (removed, purge) {
                (true, true) => println!("Removed year {} and deleted its records", year),
                (true, false) => println!("Removed year {}", year),
                (false, _) => println!("Year {} was not listed", year),
            }
        }
    }

    Ok(())
}
