//! Request handling of the relay, independent of any socket

use std::thread;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use super::providers::{EmailProvider, ResendClient, TwilioClient, WhatsAppProvider};
use crate::config::{ProviderCredentials, Settings};
use crate::error::{HoaError, HoaResult};
use crate::messaging::{
    normalize_phone, EmailRequest, EmailResponse, MessageTransport, WhatsAppRequest,
    WhatsAppResponse,
};

pub const MISSING_FIELDS: &str = "Faltan datos requeridos";

/// Delays applied by simulated deliveries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedDelays {
    pub email: Duration,
    pub whatsapp: Duration,
}

impl SimulatedDelays {
    pub const fn none() -> Self {
        Self {
            email: Duration::ZERO,
            whatsapp: Duration::ZERO,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            email: Duration::from_millis(settings.simulated_email_delay_ms),
            whatsapp: Duration::from_millis(settings.simulated_whatsapp_delay_ms),
        }
    }
}

impl Default for SimulatedDelays {
    fn default() -> Self {
        Self {
            email: Duration::from_millis(1000),
            whatsapp: Duration::from_millis(1500),
        }
    }
}

/// Status code and JSON body of a relay answer
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: Value,
}

impl RelayResponse {
    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        let body = serde_json::to_value(payload).unwrap_or_else(|_| json!({}));
        Self { status, body }
    }

    fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "success": false, "error": message.into() }),
        }
    }
}

/// Forwards messages to the providers, or simulates them without credentials
pub struct Relay {
    email: Option<Box<dyn EmailProvider>>,
    whatsapp: Option<Box<dyn WhatsAppProvider>>,
    delays: SimulatedDelays,
}

fn simulated_id() -> String {
    format!("sim_{}", Utc::now().timestamp_millis())
}

impl Relay {
    /// Real providers for whichever credentials are present
    pub fn new(credentials: &ProviderCredentials, delays: SimulatedDelays) -> Self {
        Self {
            email: credentials
                .resend_api_key
                .as_ref()
                .map(|key| Box::new(ResendClient::new(key.clone())) as Box<dyn EmailProvider>),
            whatsapp: credentials
                .twilio
                .clone()
                .map(|c| Box::new(TwilioClient::new(c)) as Box<dyn WhatsAppProvider>),
            delays,
        }
    }

    /// Simulation for both channels
    pub fn simulated(delays: SimulatedDelays) -> Self {
        Self::new(&ProviderCredentials::simulated(), delays)
    }

    pub fn with_email_provider(mut self, provider: Box<dyn EmailProvider>) -> Self {
        self.email = Some(provider);
        self
    }

    pub fn with_whatsapp_provider(mut self, provider: Box<dyn WhatsAppProvider>) -> Self {
        self.whatsapp = Some(provider);
        self
    }

    pub fn email_simulated(&self) -> bool {
        self.email.is_none()
    }

    pub fn whatsapp_simulated(&self) -> bool {
        self.whatsapp.is_none()
    }

    pub fn deliver_email(&self, request: &EmailRequest) -> HoaResult<EmailResponse> {
        if !request.is_complete() {
            return Err(HoaError::Validation(MISSING_FIELDS.to_string()));
        }

        match &self.email {
            Some(provider) => {
                let id = provider.send(request)?;
                info!(to = %request.to, %id, "email delivered");
                Ok(EmailResponse {
                    success: true,
                    id: Some(id),
                    ..Default::default()
                })
            }
            None => {
                info!(
                    to = %request.to,
                    from = %request.sender(),
                    subject = %request.subject,
                    attachments = request.attachments.len(),
                    "simulated email"
                );
                thread::sleep(self.delays.email);
                Ok(EmailResponse {
                    success: true,
                    id: Some(simulated_id()),
                    message: Some("Email enviado exitosamente (modo simulación)".to_string()),
                    error: None,
                })
            }
        }
    }

    pub fn deliver_whatsapp(&self, request: &WhatsAppRequest) -> HoaResult<WhatsAppResponse> {
        if !request.is_complete() {
            return Err(HoaError::Validation(MISSING_FIELDS.to_string()));
        }
        let to = normalize_phone(&request.to);
        let from = normalize_phone(&request.from);

        match &self.whatsapp {
            Some(provider) => {
                let sid = provider.send(&from, &to, &request.message)?;
                info!(%to, %sid, "whatsapp delivered");
                Ok(WhatsAppResponse {
                    success: true,
                    sid: Some(sid),
                    ..Default::default()
                })
            }
            None => {
                let preview: String = request.message.chars().take(100).collect();
                info!(%to, %from, message = %preview, "simulated whatsapp");
                thread::sleep(self.delays.whatsapp);
                Ok(WhatsAppResponse {
                    success: true,
                    sid: Some(simulated_id()),
                    message: Some("WhatsApp enviado exitosamente (modo simulación)".to_string()),
                    error: None,
                })
            }
        }
    }

    /// Answer one HTTP request
    pub fn handle(&self, method: &str, path: &str, body: &[u8]) -> RelayResponse {
        let path = path.split('?').next().unwrap_or_default();
        match (method, path) {
            ("POST", "/send-email") => match serde_json::from_slice::<EmailRequest>(body) {
                Ok(request) => respond(self.deliver_email(&request)),
                Err(e) => RelayResponse::failure(400, format!("JSON inválido: {}", e)),
            },
            ("POST", "/send-whatsapp") => match serde_json::from_slice::<WhatsAppRequest>(body) {
                Ok(request) => respond(self.deliver_whatsapp(&request)),
                Err(e) => RelayResponse::failure(400, format!("JSON inválido: {}", e)),
            },
            (_, "/send-email" | "/send-whatsapp") => {
                RelayResponse::failure(405, "Método no permitido")
            }
            _ => RelayResponse::failure(404, "Ruta no encontrada"),
        }
    }
}

fn respond<T: Serialize>(result: HoaResult<T>) -> RelayResponse {
    match result {
        Ok(payload) => RelayResponse::json(200, &payload),
        Err(HoaError::Validation(message)) => RelayResponse::failure(400, message),
        Err(e) => {
            error!(error = %e, "delivery failed");
            let message = match e {
                HoaError::Provider(message) => message,
                other => other.to_string(),
            };
            RelayResponse::failure(500, message)
        }
    }
}

/// The relay used in process, without HTTP in between
impl MessageTransport for Relay {
    fn send_email(&self, request: &EmailRequest) -> HoaResult<EmailResponse> {
        self.deliver_email(request)
    }

    fn send_whatsapp(&self, request: &WhatsAppRequest) -> HoaResult<WhatsAppResponse> {
        self.deliver_whatsapp(request)
    }
}
