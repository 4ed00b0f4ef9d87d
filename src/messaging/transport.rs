//! How messages leave the process

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::dto::{EmailRequest, EmailResponse, WhatsAppRequest, WhatsAppResponse};
use crate::error::{HoaError, HoaResult};

/// Delivery seam between the senders and the relay
pub trait MessageTransport {
    fn send_email(&self, request: &EmailRequest) -> HoaResult<EmailResponse>;

    fn send_whatsapp(&self, request: &WhatsAppRequest) -> HoaResult<WhatsAppResponse>;
}

/// Client of a relay server reached over HTTP
pub struct HttpRelay {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpRelay {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> HoaResult<R> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "posting to relay");

        let response = match self.agent.post(&url).send_json(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let detail = response
                    .into_json::<serde_json::Value>()
                    .ok()
                    .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                    .unwrap_or_else(|| "no details".to_string());
                return Err(HoaError::Provider(format!(
                    "relay answered {}: {}",
                    code, detail
                )));
            }
            Err(e) => return Err(HoaError::Provider(format!("relay unreachable: {}", e))),
        };

        response
            .into_json()
            .map_err(|e| HoaError::Provider(format!("unreadable relay response: {}", e)))
    }
}

impl MessageTransport for HttpRelay {
    fn send_email(&self, request: &EmailRequest) -> HoaResult<EmailResponse> {
        let response: EmailResponse = self.post("/send-email", request)?;
        if !response.success {
            return Err(HoaError::Provider(
                response.error.unwrap_or_else(|| "email rejected".to_string()),
            ));
        }
        Ok(response)
    }

    fn send_whatsapp(&self, request: &WhatsAppRequest) -> HoaResult<WhatsAppResponse> {
        let response: WhatsAppResponse = self.post("/send-whatsapp", request)?;
        if !response.success {
            return Err(HoaError::Provider(
                response.error.unwrap_or_else(|| "message rejected".to_string()),
            ));
        }
        Ok(response)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Records every request; fails deliveries to the listed recipients
    #[derive(Default)]
    pub struct RecordingTransport {
        pub emails: RefCell<Vec<EmailRequest>>,
        pub whatsapps: RefCell<Vec<WhatsAppRequest>>,
        pub failing: Vec<String>,
    }

    impl RecordingTransport {
        pub fn failing_for(recipients: &[&str]) -> Self {
            Self {
                failing: recipients.iter().map(|r| r.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl MessageTransport for RecordingTransport {
        fn send_email(&self, request: &EmailRequest) -> HoaResult<EmailResponse> {
            self.emails.borrow_mut().push(request.clone());
            if self.failing.contains(&request.to) {
                return Err(HoaError::Provider("mailbox unavailable".into()));
            }
            Ok(EmailResponse {
                success: true,
                id: Some(format!("test_{}", self.emails.borrow().len())),
                ..Default::default()
            })
        }

        fn send_whatsapp(&self, request: &WhatsAppRequest) -> HoaResult<WhatsAppResponse> {
            self.whatsapps.borrow_mut().push(request.clone());
            if self.failing.contains(&request.to) {
                return Err(HoaError::Provider("number not on WhatsApp".into()));
            }
            Ok(WhatsAppResponse {
                success: true,
                sid: Some(format!("test_{}", self.whatsapps.borrow().len())),
                ..Default::default()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let relay = HttpRelay::new("http://127.0.0.1:8787/");
        assert_eq!(relay.base_url(), "http://127.0.0.1:8787");
    }

    #[test]
    fn test_unreachable_relay_is_provider_error() {
        // port 9 (discard) is closed on test machines
        let relay = HttpRelay::new("http://127.0.0.1:9");
        let err = relay.send_email(&EmailRequest::default()).unwrap_err();
        assert!(err.is_provider());
    }
}
