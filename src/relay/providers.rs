//! Outbound provider clients: Resend for email, Twilio for WhatsApp

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::config::TwilioCredentials;
use crate::error::{HoaError, HoaResult};
use crate::messaging::EmailRequest;

pub const RESEND_URL: &str = "https://api.resend.com/emails";
pub const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Delivers an email; returns the provider's message id
pub trait EmailProvider: Send + Sync {
    fn send(&self, request: &EmailRequest) -> HoaResult<String>;
}

/// Delivers a WhatsApp message between normalized numbers; returns the SID
pub trait WhatsAppProvider: Send + Sync {
    fn send(&self, from: &str, to: &str, body: &str) -> HoaResult<String>;
}

fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(30))
        .build()
}

fn provider_error(provider: &str, err: ureq::Error) -> HoaError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            HoaError::Provider(format!("{} API error ({}): {}", provider, code, body))
        }
        other => HoaError::Provider(format!("{} unreachable: {}", provider, other)),
    }
}

pub struct ResendClient {
    agent: ureq::Agent,
    api_key: String,
}

#[derive(Deserialize)]
struct ResendReply {
    id: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            agent: agent(),
            api_key: api_key.into(),
        }
    }
}

impl EmailProvider for ResendClient {
    fn send(&self, request: &EmailRequest) -> HoaResult<String> {
        let body = json!({
            "from": request.sender(),
            "to": [request.to],
            "subject": request.subject,
            "html": request.html,
            "attachments": request.attachments,
        });

        let reply: ResendReply = self
            .agent
            .post(RESEND_URL)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body)
            .map_err(|e| provider_error("Resend", e))?
            .into_json()
            .map_err(|e| HoaError::Provider(format!("unreadable Resend reply: {}", e)))?;
        Ok(reply.id)
    }
}

pub struct TwilioClient {
    agent: ureq::Agent,
    credentials: TwilioCredentials,
}

#[derive(Deserialize)]
struct TwilioReply {
    sid: String,
}

impl TwilioClient {
    pub fn new(credentials: TwilioCredentials) -> Self {
        Self {
            agent: agent(),
            credentials,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.credentials.account_sid
        )
    }

    fn authorization(&self) -> String {
        let pair = format!(
            "{}:{}",
            self.credentials.account_sid, self.credentials.auth_token
        );
        format!("Basic {}", STANDARD.encode(pair))
    }
}

impl WhatsAppProvider for TwilioClient {
    fn send(&self, from: &str, to: &str, body: &str) -> HoaResult<String> {
        let from = format!("whatsapp:{}", from);
        let to = format!("whatsapp:{}", to);

        let reply: TwilioReply = self
            .agent
            .post(&self.messages_url())
            .set("Authorization", &self.authorization())
            .send_form(&[("From", from.as_str()), ("To", to.as_str()), ("Body", body)])
            .map_err(|e| provider_error("Twilio", e))?
            .into_json()
            .map_err(|e| HoaError::Provider(format!("unreadable Twilio reply: {}", e)))?;
        Ok(reply.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twilio_request_parts() {
        let client = TwilioClient::new(TwilioCredentials {
            account_sid: "AC123".into(),
            auth_token: "secret".into(),
        });

        assert_eq!(
            client.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
        // base64("AC123:secret")
        assert_eq!(client.authorization(), "Basic QUMxMjM6c2VjcmV0");
    }
}
