//! Path management for houseshare
//!
//! ## Path Resolution Order
//!
//! 1. `HOUSESHARE_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `houseshare`
//!    (`~/.config/houseshare` on Linux, `~/Library/Application Support/houseshare`
//!    on macOS, `%APPDATA%\houseshare\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::HouseshareError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "HOUSESHARE_DATA_DIR";

/// Manages all paths used by houseshare
#[derive(Debug, Clone)]
pub struct HousesharePaths {
    /// Base directory for all houseshare data
    base_dir: PathBuf,
}

impl HousesharePaths {
    /// Resolve paths from the environment or the platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, HouseshareError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "houseshare")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    HouseshareError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), HouseshareError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            HouseshareError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            HouseshareError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if houseshare has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
