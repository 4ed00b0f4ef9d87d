//! Email and WhatsApp sending commands
//!
//! Messages go through the in-process relay unless `--remote` or
//! `--relay-url` points at a running `hoa serve`.

use clap::{Args, Subcommand};

use super::{month_or_current, year_or_current};
use crate::config::{ProviderCredentials, Settings};
use crate::documents::ReceiptData;
use crate::error::{HoaError, HoaResult};
use crate::messaging::whatsapp::notification_message;
use crate::messaging::{EmailSender, HttpRelay, MessageTransport, WhatsAppSender};
use crate::relay::{Relay, SimulatedDelays};
use crate::reports::{receipt_for, receipts_for_active};
use crate::services::ConfigService;
use crate::storage::Storage;

/// What to send and to whom
#[derive(Args)]
pub struct SendTarget {
    /// House number, id or name
    #[arg(long, conflicts_with = "all_active")]
    pub house: Option<String>,
    /// Every active house
    #[arg(long)]
    pub all_active: bool,
    /// Send a notification instead of the monthly receipt
    #[arg(long)]
    pub message: Option<String>,
    #[arg(short, long)]
    pub month: Option<String>,
    #[arg(short, long)]
    pub year: Option<String>,
    /// Send through the relay server at the configured URL
    #[arg(long)]
    pub remote: bool,
    /// Send through the relay server at this URL
    #[arg(long)]
    pub relay_url: Option<String>,
}

#[derive(Subcommand)]
pub enum SendCommands {
    /// Email receipts or a notification
    Email {
        #[command(flatten)]
        target: SendTarget,
        /// Subject of a notification
        #[arg(long, default_value = "Aviso de la Administración")]
        subject: String,
    },

    /// WhatsApp receipts or a notification
    Whatsapp {
        #[command(flatten)]
        target: SendTarget,
    },
}

pub fn handle_send_command(storage: &Storage, settings: &Settings, cmd: SendCommands) -> HoaResult<()> {
    let (target, subject) = match cmd {
        SendCommands::Email { target, subject } => (target, Some(subject)),
        SendCommands::Whatsapp { target } => (target, None),
    };

    let relay_url = match (&target.relay_url, target.remote) {
        (Some(url), _) => Some(url.clone()),
        (None, true) => Some(settings.relay_url.clone()),
        (None, false) => None,
    };
    let transport: Box<dyn MessageTransport> = match relay_url {
        Some(url) => Box::new(HttpRelay::new(url)),
        None => Box::new(Relay::new(
            &ProviderCredentials::from_env(),
            SimulatedDelays::from_settings(settings),
        )),
    };

    let receipts = recipients(storage, &target)?;
    let communication = ConfigService::new(storage).communication()?;

    let outcome = match (subject, &target.message) {
        (Some(subject), message) => {
            let sender = EmailSender::new(transport.as_ref(), communication)
                .with_pause(settings.email_pause());
            match message {
                Some(message) => {
                    let emails = contacts(&receipts, |r| r.email.as_deref());
                    let mut outcome = sender.send_bulk_notifications(&emails, &subject, message);
                    outcome.failed += receipts.len() - emails.len();
                    outcome
                }
                None => sender.send_receipts(&receipts),
            }
        }
        (None, message) => {
            let sender = WhatsAppSender::new(transport.as_ref(), &communication)
                .with_pause(settings.whatsapp_pause());
            match message {
                Some(message) => {
                    let phones = contacts(&receipts, |r| r.phone.as_deref());
                    let mut outcome =
                        sender.send_bulk_messages(&phones, &notification_message(message));
                    outcome.failed += receipts.len() - phones.len();
                    outcome
                }
                None => sender.send_receipts(&receipts),
            }
        }
    };

    println!("Sent: {}  Failed: {}", outcome.success, outcome.failed);
    if outcome.success == 0 && outcome.failed > 0 {
        return Err(HoaError::Provider("No message was delivered".into()));
    }
    Ok(())
}

fn recipients(storage: &Storage, target: &SendTarget) -> HoaResult<Vec<ReceiptData>> {
    let year = year_or_current(target.year.clone());
    let month = month_or_current(target.month.as_deref())?;

    match (&target.house, target.all_active) {
        (_, true) => receipts_for_active(storage, &year, month),
        (Some(house), false) => Ok(vec![receipt_for(storage, house, &year, month)?]),
        (None, false) => Err(HoaError::Validation(
            "Give --house or --all-active".into(),
        )),
    }
}

fn contacts<F>(receipts: &[ReceiptData], field: F) -> Vec<String>
where
    F: Fn(&ReceiptData) -> Option<&str>,
{
    receipts
        .iter()
        .filter_map(|r| field(r).filter(|v| !v.trim().is_empty()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_skip_blank() {
        let receipts = vec![
            ReceiptData {
                house: "Casa 1".into(),
                email: Some("a@example.com".into()),
                ..Default::default()
            },
            ReceiptData {
                house: "Casa 2".into(),
                email: Some(" ".into()),
                ..Default::default()
            },
            ReceiptData {
                house: "Casa 3".into(),
                ..Default::default()
            },
        ];
        assert_eq!(contacts(&receipts, |r| r.email.as_deref()), vec!["a@example.com"]);
    }

    #[test]
    fn test_recipients_requires_target() {
        let storage = Storage::in_memory();
        let target = SendTarget {
            house: None,
            all_active: false,
            message: None,
            month: Some("1".into()),
            year: Some("2024".into()),
            remote: false,
            relay_url: None,
        };
        assert!(recipients(&storage, &target).unwrap_err().is_validation());
    }
}
