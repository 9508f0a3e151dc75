//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{HouseshareError, HouseshareResult};
use crate::export::{default_filename, export_expenses_csv, export_full_json, export_full_yaml};
use crate::storage::Storage;

use super::expense::FilterArgs;

/// Full snapshot format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export expenses to CSV (the same layout `expense import` reads)
    Csv {
        /// Output file path, defaults to expenses-YYYY-MM-DD.csv
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export settings and all expenses to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> HouseshareResult<()> {
    let expenses = storage.expenses.get_all()?;

    match cmd {
        ExportCommands::Csv { output, filter } => {
            let output = output
                .unwrap_or_else(|| PathBuf::from(default_filename(chrono::Local::now().date_naive())));
            let snapshot = filter.to_filter()?.apply(&expenses);

            let mut writer = create_writer(&output)?;
            export_expenses_csv(&snapshot, &mut writer)?;
            writer.flush()?;

            println!("Exported {} expense(s) to: {}", snapshot.len(), output.display());
        }

        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_writer(&output)?;
            match format {
                ExportFormat::Json => export_full_json(settings, &expenses, &mut writer, pretty)?,
                ExportFormat::Yaml => export_full_yaml(settings, &expenses, &mut writer)?,
            }
            writer.flush()?;

            println!(
                "Exported settings and {} expense(s) to: {}",
                expenses.len(),
                output.display()
            );
        }
    }

    Ok(())
}

fn create_writer(output: &Path) -> HouseshareResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        HouseshareError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
