//! House and fine-definition CLI commands

use clap::Subcommand;

use super::ledger::report_delete;
use super::{clearable, parse_amount, parse_with};
use crate::display::{format_fine_list, format_house_details, format_house_list};
use crate::error::{HoaError, HoaResult};
use crate::models::{FinePatch, HousePatch, NewFine, NewHouse};
use crate::services::{FineService, HouseService};
use crate::state::DataHandle;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum HouseCommands {
    /// List houses
    List {
        /// Only active houses
        #[arg(long)]
        active: bool,
    },

    /// Show one house
    Show {
        /// House number, id or name
        house: String,
    },

    /// Register a house
    Add {
        number: String,
        owner: String,
        /// Display name, defaults to "Casa <number>"
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// active or inactive
        #[arg(long)]
        status: Option<String>,
    },

    /// Change fields of a house
    Edit {
        /// House number, id or name
        house: String,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        /// New email; an empty value clears it
        #[arg(long)]
        email: Option<String>,
        /// New phone; an empty value clears it
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Remove a house
    Delete {
        /// House number, id or name
        house: String,
    },
}

fn resolve_house_id(service: &HouseService, identifier: &str) -> HoaResult<String> {
    service
        .find(identifier)?
        .map(|house| house.id.to_string())
        .ok_or_else(|| HoaError::house_not_found(identifier))
}

pub fn handle_house_command(storage: &Storage, cmd: HouseCommands) -> HoaResult<()> {
    let service = HouseService::new(storage);

    match cmd {
        HouseCommands::List { active } => {
            let houses = if active {
                service.active()?
            } else {
                service.list()?
            };
            println!("{}", format_house_list(&houses));
        }

        HouseCommands::Show { house } => {
            let house = service
                .find(&house)?
                .ok_or_else(|| HoaError::house_not_found(&house))?;
            print!("{}", format_house_details(&house));
        }

        HouseCommands::Add {
            number,
            owner,
            name,
            email,
            phone,
            status,
        } => {
            let draft = NewHouse {
                name: name.unwrap_or_else(|| format!("Casa {}", number)),
                number,
                owner,
                status: status.as_deref().map(parse_with).transpose()?.unwrap_or_default(),
                email,
                phone,
            };
            let house = DataHandle::new(service).create(draft)?;
            println!("Registered {} ({}) with id {}", house.name, house.owner, house.id);
        }

        HouseCommands::Edit {
            house,
            number,
            name,
            owner,
            email,
            phone,
            status,
        } => {
            let id = resolve_house_id(&service, &house)?;
            let patch = HousePatch {
                number,
                name,
                owner,
                status: status.as_deref().map(parse_with).transpose()?,
                email: clearable(email),
                phone: clearable(phone),
            };
            let house = DataHandle::new(service).update(&id, &patch)?;
            println!("Updated {} ({})", house.name, house.status);
        }

        HouseCommands::Delete { house } => {
            let id = resolve_house_id(&service, &house)?;
            report_delete("house", &id, DataHandle::new(service).delete(&id)?);
        }
    }

    Ok(())
}

#[derive(Subcommand)]
pub enum FineCommands {
    /// List fine definitions
    List {
        /// Only active definitions
        #[arg(long)]
        active: bool,
    },

    /// Define a fine
    Add {
        name: String,
        amount: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "General")]
        category: String,
        /// Create it inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Change fields of a fine definition
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a fine definition
    Delete { id: String },
}

pub fn handle_fine_command(storage: &Storage, cmd: FineCommands) -> HoaResult<()> {
    let service = FineService::new(storage);

    match cmd {
        FineCommands::List { active } => {
            let fines = if active {
                service.active()?
            } else {
                service.list()?
            };
            println!("{}", format_fine_list(&fines));
        }

        FineCommands::Add {
            name,
            amount,
            description,
            category,
            inactive,
        } => {
            let draft = NewFine {
                name,
                description,
                amount: parse_amount(&amount)?,
                active: !inactive,
                category,
            };
            let fine = DataHandle::new(service).create(draft)?;
            println!("Defined '{}' at {} with id {}", fine.name, fine.amount, fine.id);
        }

        FineCommands::Edit {
            id,
            name,
            amount,
            description,
            category,
            active,
        } => {
            let patch = FinePatch {
                name,
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                active,
                category,
            };
            let fine = DataHandle::new(service).update(&id, &patch)?;
            println!("Updated '{}' ({})", fine.name, fine.amount);
        }

        FineCommands::Delete { id } => {
            report_delete("fine", &id, DataHandle::new(service).delete(&id)?);
        }
    }

    Ok(())
}
