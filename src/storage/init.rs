//! Storage initialization
//!
//! Handles first-run setup: the default household settings and an empty
//! expense file.

use crate::config::paths::HousesharePaths;
use crate::config::settings::Settings;
use crate::error::HouseshareError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh household
///
/// Returns `true` if anything was created. Existing files are left alone.
pub fn initialize_storage(paths: &HousesharePaths) -> Result<bool, HouseshareError> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created = true;
    }

    if !paths.expenses_file().exists() {
        write_json_atomic(paths.expenses_file(), &serde_json::json!({ "expenses": [] }))?;
        created = true;
    }

    if created {
        tracing::info!(base = %paths.base_dir().display(), "initialized storage");
    }
    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &HousesharePaths) -> bool {
    !paths.settings_file().exists() || !paths.expenses_file().exists()
}
