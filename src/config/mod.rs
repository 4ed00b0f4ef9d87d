//! Configuration module
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Provider credentials from the environment

pub mod credentials;
pub mod paths;
pub mod settings;

pub use credentials::{ProviderCredentials, TwilioCredentials};
pub use paths::HoaPaths;
pub use settings::Settings;
