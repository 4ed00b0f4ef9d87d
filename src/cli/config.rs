//! Association and communication settings commands

use clap::Subcommand;

use super::parse_amount;
use crate::display::{format_association, format_communication};
use crate::error::HoaResult;
use crate::models::{AssociationPatch, CommunicationPatch};
use crate::services::ConfigService;
use crate::state::ConfigHandle;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the association settings
    Show,

    /// Change association settings
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Monthly fee per house
        #[arg(long)]
        monthly_fee: Option<String>,
        #[arg(long)]
        currency: Option<String>,
    },
}

pub fn handle_config_command(storage: &Storage, cmd: ConfigCommands) -> HoaResult<()> {
    let service = ConfigService::new(storage);

    match cmd {
        ConfigCommands::Show => print!("{}", format_association(&service.association()?)),

        ConfigCommands::Set {
            name,
            address,
            phone,
            email,
            monthly_fee,
            currency,
        } => {
            let patch = AssociationPatch {
                name,
                address,
                phone,
                email,
                monthly_fee: monthly_fee.as_deref().map(parse_amount).transpose()?,
                currency,
            };
            let config = service.update_association(&patch)?;
            println!("Association settings saved.");
            print!("{}", format_association(&config));
        }
    }

    Ok(())
}

#[derive(Subcommand)]
pub enum CommunicationCommands {
    /// Show the sender settings for email and WhatsApp
    Show,

    /// Change sender settings
    Set {
        #[arg(long)]
        from_email: Option<String>,
        #[arg(long)]
        from_name: Option<String>,
        #[arg(long)]
        whatsapp_number: Option<String>,
        /// Email signature; "\n" separates lines
        #[arg(long)]
        signature: Option<String>,
    },
}

pub fn handle_communication_command(storage: &Storage, cmd: CommunicationCommands) -> HoaResult<()> {
    let mut handle = ConfigHandle::new(ConfigService::new(storage));

    match cmd {
        CommunicationCommands::Show => {
            if let Some(error) = &handle.state().error {
                return Err(crate::error::HoaError::Storage(error.clone()));
            }
            if let Some(config) = &handle.state().data {
                print!("{}", format_communication(config));
            }
        }

        CommunicationCommands::Set {
            from_email,
            from_name,
            whatsapp_number,
            signature,
        } => {
            let patch = CommunicationPatch {
                from_email,
                from_name,
                whatsapp_number,
                signature: signature.map(|s| s.replace("\\n", "\n")),
            };
            let config = handle.update(&patch)?;
            println!("Communication settings saved.");
            print!("{}", format_communication(&config));
        }
    }

    Ok(())
}
