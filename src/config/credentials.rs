//! Provider credentials
//!
//! Email (Resend) and WhatsApp (Twilio) credentials come from the
//! environment. When they are absent the relay runs in simulation mode.

/// Environment variable holding the Resend API key
pub const RESEND_API_KEY_ENV: &str = "RESEND_API_KEY";
/// Environment variable holding the Twilio account SID
pub const TWILIO_ACCOUNT_SID_ENV: &str = "TWILIO_ACCOUNT_SID";
/// Environment variable holding the Twilio auth token
pub const TWILIO_AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";

/// Twilio account credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
}

/// Credentials for the outbound providers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub resend_api_key: Option<String>,
    pub twilio: Option<TwilioCredentials>,
}

impl ProviderCredentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary lookup (env-like)
    ///
    /// Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let twilio = match (get(TWILIO_ACCOUNT_SID_ENV), get(TWILIO_AUTH_TOKEN_ENV)) {
            (Some(account_sid), Some(auth_token)) => Some(TwilioCredentials {
                account_sid,
                auth_token,
            }),
            _ => None,
        };

        Self {
            resend_api_key: get(RESEND_API_KEY_ENV),
            twilio,
        }
    }

    /// No credentials at all
    pub fn simulated() -> Self {
        Self::default()
    }

    pub fn email_simulated(&self) -> bool {
        self.resend_api_key.is_none()
    }

    pub fn whatsapp_simulated(&self) -> bool {
        self.twilio.is_none()
    }
}
