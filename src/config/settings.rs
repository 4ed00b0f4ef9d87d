//! User settings for the HOA back office
//!
//! Manages simulated storage latency, messaging pauses and the relay server
//! endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::HoaPaths;
use crate::error::HoaError;
use crate::storage::file_io::write_json_atomic;
use crate::storage::Latency;

/// Application settings, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Lower bound of the simulated storage latency
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,

    /// Upper bound of the simulated storage latency
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,

    /// Address the relay server binds to
    #[serde(default = "default_relay_bind")]
    pub relay_bind: String,

    /// Base URL the messaging senders post to
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Pause after each message of a bulk email send
    #[serde(default = "default_email_pause_ms")]
    pub email_pause_ms: u64,

    /// Pause after each message of a bulk WhatsApp send
    #[serde(default = "default_whatsapp_pause_ms")]
    pub whatsapp_pause_ms: u64,

    /// Delay of a simulated email send in the relay
    #[serde(default = "default_simulated_email_delay_ms")]
    pub simulated_email_delay_ms: u64,

    /// Delay of a simulated WhatsApp send in the relay
    #[serde(default = "default_simulated_whatsapp_delay_ms")]
    pub simulated_whatsapp_delay_ms: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_latency_min_ms() -> u64 {
    200
}

fn default_latency_max_ms() -> u64 {
    500
}

fn default_relay_bind() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_relay_url() -> String {
    "http://127.0.0.1:8787".to_string()
}

fn default_email_pause_ms() -> u64 {
    500
}

fn default_whatsapp_pause_ms() -> u64 {
    1000
}

fn default_simulated_email_delay_ms() -> u64 {
    1000
}

fn default_simulated_whatsapp_delay_ms() -> u64 {
    1500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
            relay_bind: default_relay_bind(),
            relay_url: default_relay_url(),
            email_pause_ms: default_email_pause_ms(),
            whatsapp_pause_ms: default_whatsapp_pause_ms(),
            simulated_email_delay_ms: default_simulated_email_delay_ms(),
            simulated_whatsapp_delay_ms: default_simulated_whatsapp_delay_ms(),
        }
    }
}

impl Settings {
    /// Storage latency derived from the configured bounds
    pub fn latency(&self) -> Latency {
        Latency::between(
            Duration::from_millis(self.latency_min_ms),
            Duration::from_millis(self.latency_max_ms),
        )
    }

    pub fn email_pause(&self) -> Duration {
        Duration::from_millis(self.email_pause_ms)
    }

    pub fn whatsapp_pause(&self) -> Duration {
        Duration::from_millis(self.whatsapp_pause_ms)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &HoaPaths) -> Result<Self, HoaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| HoaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| HoaError::Config(format!("Failed to parse settings file: {}", e)))?;

            if settings.latency_min_ms > settings.latency_max_ms {
                return Err(HoaError::Config(format!(
                    "latency_min_ms ({}) is greater than latency_max_ms ({})",
                    settings.latency_min_ms, settings.latency_max_ms
                )));
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HoaPaths) -> Result<(), HoaError> {
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
    }
}
