//! YAML export of the whole household

use std::io::Write;

use crate::config::settings::Settings;
use crate::error::{HouseshareError, HouseshareResult};
use crate::export::json::FullExport;
use crate::models::Expense;

/// Write the full export as YAML with a short comment header
pub fn export_full_yaml<W: Write>(
    settings: &Settings,
    expenses: &[Expense],
    mut writer: W,
) -> HouseshareResult<()> {
    let export = FullExport::new(settings, expenses);

    writeln!(writer, "# houseshare export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| HouseshareError::Export(e.to_string()))
}
