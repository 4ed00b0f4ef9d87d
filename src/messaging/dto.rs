//! Wire types shared by the senders and the relay

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    /// Base64 encoded file content
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Body of `POST /send-email`
///
/// Missing fields deserialize as empty strings so the relay can answer
/// with a validation error instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl EmailRequest {
    /// Whether every required field is present
    pub fn is_complete(&self) -> bool {
        [&self.to, &self.from, &self.subject, &self.html]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// `Name <address>`, or the bare address without a name
    pub fn sender(&self) -> String {
        if self.from_name.trim().is_empty() {
            self.from.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /send-whatsapp`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub message: String,
}

impl WhatsAppRequest {
    pub fn is_complete(&self) -> bool {
        [&self.to, &self.from, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_request_wire_names() {
        let request = EmailRequest {
            to: "casa1@email.com".into(),
            from: "admin@miresidencial.com".into(),
            from_name: "Administración Residencial".into(),
            subject: "Aviso".into(),
            html: "<p>Hola</p>".into(),
            attachments: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["fromName"], "Administración Residencial");
        assert!(json.get("attachments").is_none());
        assert_eq!(request.sender(), "Administración Residencial <admin@miresidencial.com>");
    }

    #[test]
    fn test_missing_fields_are_incomplete() {
        let request: EmailRequest = serde_json::from_str(r#"{"to":"a@b.c","subject":"x"}"#).unwrap();
        assert!(!request.is_complete());

        let request: WhatsAppRequest =
            serde_json::from_str(r#"{"to":"+5215550001","from":"+525551234567","message":"hola"}"#)
                .unwrap();
        assert!(request.is_complete());
    }

    #[test]
    fn test_attachment_type_field() {
        let attachment = Attachment {
            filename: "recibo.txt".into(),
            content: "UkVDSUJP".into(),
            content_type: "text/plain".into(),
        };
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["type"], "text/plain");
    }
}
