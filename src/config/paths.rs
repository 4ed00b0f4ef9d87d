//! Path management for the HOA back office
//!
//! Provides XDG-compliant path resolution for configuration, data, and the
//! audit journal.
//!
//! ## Path Resolution Order
//!
//! 1. `HOA_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/hoa-cli` or `~/.config/hoa-cli`
//! 3. Windows: `%APPDATA%\hoa-cli`

use std::path::PathBuf;

use crate::error::HoaError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "HOA_CLI_DATA_DIR";

/// Manages all paths used by the application
#[derive(Debug, Clone)]
pub struct HoaPaths {
    /// Base directory for all data
    base_dir: PathBuf,
}

impl HoaPaths {
    /// Create a new HoaPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, HoaError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create HoaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/hoa-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding one JSON file per storage key
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit journal
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), HoaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HoaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| HoaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, HoaError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("hoa-cli"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| HoaError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("hoa-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, HoaError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| HoaError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("hoa-cli"))
}
