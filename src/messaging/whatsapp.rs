//! WhatsApp facade

use std::thread;
use std::time::Duration;

use tracing::warn;

use super::dto::{WhatsAppRequest, WhatsAppResponse};
use super::transport::MessageTransport;
use super::BulkOutcome;
use crate::documents::format::amount;
use crate::documents::ReceiptData;
use crate::error::HoaResult;
use crate::models::CommunicationConfig;

pub const DEFAULT_WHATSAPP_PAUSE: Duration = Duration::from_millis(1000);

pub fn receipt_message(receipt: &ReceiptData) -> String {
    format!(
        "🏠 *Recibo de Cuotas*

📋 *Detalles:*
• Casa: {house}
• Período: {month} {year}
• Fecha límite: {due}

💰 *Total a pagar: {total}*

📄 El recibo detallado ha sido enviado por email.

Gracias por su pago puntual. 🙏

Para consultas, responda a este mensaje.",
        house = receipt.house,
        month = receipt.month.as_deref().unwrap_or_default(),
        year = receipt.year.as_deref().unwrap_or_default(),
        due = receipt.due_date.as_deref().unwrap_or("No especificada"),
        total = amount(receipt.total),
    )
}

pub fn notification_message(message: &str) -> String {
    format!(
        "🏠 *Notificación Residencial*\n\n{}\n\nPara más información, contáctenos.",
        message
    )
}

pub struct WhatsAppSender<'a> {
    transport: &'a dyn MessageTransport,
    from: String,
    pause: Duration,
}

impl<'a> WhatsAppSender<'a> {
    pub fn new(transport: &'a dyn MessageTransport, config: &CommunicationConfig) -> Self {
        Self {
            transport,
            from: config.whatsapp_number.clone(),
            pause: DEFAULT_WHATSAPP_PAUSE,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Send `message` verbatim to `phone`
    pub fn send(&self, phone: &str, message: &str) -> HoaResult<WhatsAppResponse> {
        self.transport.send_whatsapp(&WhatsAppRequest {
            to: phone.to_string(),
            from: self.from.clone(),
            message: message.to_string(),
        })
    }

    pub fn send_receipt(&self, phone: &str, receipt: &ReceiptData) -> HoaResult<WhatsAppResponse> {
        self.send(phone, &receipt_message(receipt))
    }

    pub fn send_notification(&self, phone: &str, message: &str) -> HoaResult<WhatsAppResponse> {
        self.send(phone, &notification_message(message))
    }

    /// Send `message` to every phone, one at a time
    pub fn send_bulk_messages(&self, phones: &[String], message: &str) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for phone in phones {
            match self.send(phone, message) {
                Ok(_) => outcome.success += 1,
                Err(e) => {
                    warn!(recipient = %phone, error = %e, "whatsapp message failed");
                    outcome.failed += 1;
                }
            }
            thread::sleep(self.pause);
        }
        outcome
    }

    /// Send each receipt to the phone printed on it
    ///
    /// Receipts without a phone count as failed.
    pub fn send_receipts(&self, receipts: &[ReceiptData]) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for receipt in receipts {
            let Some(phone) = receipt.phone.as_deref().filter(|p| !p.trim().is_empty()) else {
                warn!(house = %receipt.house, "no phone on file");
                outcome.failed += 1;
                continue;
            };
            match self.send_receipt(phone, receipt) {
                Ok(_) => outcome.success += 1,
                Err(e) => {
                    warn!(recipient = %phone, error = %e, "receipt whatsapp failed");
                    outcome.failed += 1;
                }
            }
            thread::sleep(self.pause);
        }
        outcome
    }
}
