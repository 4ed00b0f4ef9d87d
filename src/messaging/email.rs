//! Email facade: receipts and notifications rendered as HTML

use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Local, NaiveDate};
use tracing::warn;

use super::dto::{Attachment, EmailRequest, EmailResponse};
use super::transport::MessageTransport;
use super::BulkOutcome;
use crate::documents::format::{amount, short_date};
use crate::documents::{receipt_text, ReceiptData};
use crate::error::HoaResult;
use crate::models::CommunicationConfig;

pub const DEFAULT_EMAIL_PAUSE: Duration = Duration::from_millis(500);

const STYLE: &str = "body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
    .header { background: #2563eb; color: white; padding: 20px; text-align: center; }
    .content { padding: 20px; }
    .details { background: #f8f9fa; padding: 15px; border-radius: 5px; margin: 20px 0; }
    .total { font-size: 18px; font-weight: bold; color: #2563eb; }
    .footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; }";

/// One `<p>` per line
fn paragraphs(text: &str) -> String {
    text.lines().map(|line| format!("<p>{}</p>", line)).collect()
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html>
<head>
  <meta charset=\"utf-8\">
  <style>
    {STYLE}
  </style>
</head>
<body>
{body}
</body>
</html>"
    )
}

fn period(receipt: &ReceiptData) -> String {
    format!(
        "{} {}",
        receipt.month.as_deref().unwrap_or_default(),
        receipt.year.as_deref().unwrap_or_default()
    )
}

/// HTML body of a receipt email
pub fn receipt_html(receipt: &ReceiptData, signature: &str, issued: NaiveDate) -> String {
    let period = period(receipt);
    page(&format!(
        "  <div class=\"header\">
    <h1>🏠 Recibo de Cuotas</h1>
    <p>Residencial - {period}</p>
  </div>
  <div class=\"content\">
    <p>Estimado(a) propietario(a),</p>
    <p>Adjuntamos el recibo correspondiente a las cuotas del mes de <strong>{period}</strong>.</p>
    <div class=\"details\">
      <h3>Detalles del Recibo</h3>
      <p><strong>Casa:</strong> {house}</p>
      <p><strong>Período:</strong> {period}</p>
      <p><strong>Fecha de emisión:</strong> {issued}</p>
      <p><strong>Fecha límite de pago:</strong> {due}</p>
      <p class=\"total\"><strong>Total a pagar: {total}</strong></p>
    </div>
    <p>Por favor, realice el pago antes de la fecha límite para evitar recargos.</p>
    <p>Si tiene alguna pregunta o necesita aclaración sobre este recibo, no dude en contactarnos.</p>
    <div class=\"footer\">{signature}</div>
  </div>",
        house = receipt.house,
        issued = short_date(issued),
        due = receipt.due_date.as_deref().unwrap_or("No especificada"),
        total = amount(receipt.total),
        signature = paragraphs(signature),
    ))
}

/// HTML body of a free-form notification
pub fn notification_html(message: &str, signature: &str) -> String {
    page(&format!(
        "  <div class=\"header\">
    <h1>🏠 Notificación Residencial</h1>
  </div>
  <div class=\"content\">
    <div class=\"details\">{message}</div>
    <div class=\"footer\">{signature}</div>
  </div>",
        message = paragraphs(message),
        signature = paragraphs(signature),
    ))
}

pub struct EmailSender<'a> {
    transport: &'a dyn MessageTransport,
    config: CommunicationConfig,
    pause: Duration,
}

impl<'a> EmailSender<'a> {
    pub fn new(transport: &'a dyn MessageTransport, config: CommunicationConfig) -> Self {
        Self {
            transport,
            config,
            pause: DEFAULT_EMAIL_PAUSE,
        }
    }

    /// Pause after every message of a bulk send
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    fn request(&self, to: &str, subject: String, html: String) -> EmailRequest {
        EmailRequest {
            to: to.to_string(),
            from: self.config.from_email.clone(),
            from_name: self.config.from_name.clone(),
            subject,
            html,
            attachments: Vec::new(),
        }
    }

    pub fn send(&self, request: &EmailRequest) -> HoaResult<EmailResponse> {
        self.transport.send_email(request)
    }

    /// Email `receipt` with its text rendering attached
    pub fn send_receipt(&self, to: &str, receipt: &ReceiptData) -> HoaResult<EmailResponse> {
        let issued = Local::now().date_naive();
        let mut request = self.request(
            to,
            format!("Recibo de Cuotas - {}", period(receipt)),
            receipt_html(receipt, &self.config.signature, issued),
        );
        request.attachments.push(Attachment {
            filename: receipt.file_name(),
            content: STANDARD.encode(receipt_text(receipt, issued)),
            content_type: "text/plain".to_string(),
        });
        self.send(&request)
    }

    pub fn send_notification(&self, to: &str, subject: &str, message: &str) -> HoaResult<EmailResponse> {
        let request = self.request(
            to,
            subject.to_string(),
            notification_html(message, &self.config.signature),
        );
        self.send(&request)
    }

    /// Send the same receipt to every address, one at a time
    pub fn send_bulk_receipts(&self, emails: &[String], receipt: &ReceiptData) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for email in emails {
            match self.send_receipt(email, receipt) {
                Ok(_) => outcome.success += 1,
                Err(e) => {
                    warn!(recipient = %email, error = %e, "receipt email failed");
                    outcome.failed += 1;
                }
            }
            thread::sleep(self.pause);
        }
        outcome
    }

    /// Send the same notification to every address, one at a time
    pub fn send_bulk_notifications(
        &self,
        emails: &[String],
        subject: &str,
        message: &str,
    ) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for email in emails {
            match self.send_notification(email, subject, message) {
                Ok(_) => outcome.success += 1,
                Err(e) => {
                    warn!(recipient = %email, error = %e, "notification email failed");
                    outcome.failed += 1;
                }
            }
            thread::sleep(self.pause);
        }
        outcome
    }

    /// Send each receipt to the address printed on it
    ///
    /// Receipts without an address count as failed.
    pub fn send_receipts(&self, receipts: &[ReceiptData]) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for receipt in receipts {
            let Some(email) = receipt.email.as_deref().filter(|e| !e.trim().is_empty()) else {
                warn!(house = %receipt.house, "no email on file");
                outcome.failed += 1;
                continue;
            };
            match self.send_receipt(email, receipt) {
                Ok(_) => outcome.success += 1,
                Err(e) => {
                    warn!(recipient = %email, error = %e, "receipt email failed");
                    outcome.failed += 1;
                }
            }
            thread::sleep(self.pause);
        }
        outcome
    }
}
