//! Outgoing email and WhatsApp messages
//!
//! The senders render messages and hand them to a [`MessageTransport`]:
//! either a relay server reached over HTTP or the relay running in
//! process. Bulk sends go out one at a time with a pause after each
//! message; a failed recipient is logged and counted.

pub mod dto;
pub mod email;
pub mod transport;
pub mod whatsapp;

pub use dto::{Attachment, EmailRequest, EmailResponse, WhatsAppRequest, WhatsAppResponse};
pub use email::EmailSender;
pub use transport::{HttpRelay, MessageTransport};
pub use whatsapp::WhatsAppSender;

use serde::Serialize;

/// Tally of a bulk send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub success: usize,
    pub failed: usize,
}

/// Normalize a phone number to `+<digits>`
///
/// Numbers already starting with `+` are kept as given.
pub fn normalize_phone(phone: &str) -> String {
    let phone = phone.trim();
    if phone.starts_with('+') {
        return phone.to_string();
    }
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("+{}", digits)
}
