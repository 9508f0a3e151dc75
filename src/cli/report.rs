//! Report CLI commands
//!
//! Implements CLI commands for summaries, charts and settlement.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::MoneyFormat;
use crate::engine::{aggregate, settlement_plan, ExpenseFilter};
use crate::error::{HouseshareError, HouseshareResult};
use crate::reports::{format_transfers, ChartsReport, SummaryReport};
use crate::storage::Storage;

use super::expense::{parse_month, FilterArgs};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total spent, equal split, balances and settlement
    Summary {
        /// Only this month ("Jan 2025" or "2025-01")
        #[arg(short, long)]
        month: Option<String>,
        /// Also write the summary as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Spending by category and person contribution
    Categories {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Month-by-month spending per roommate
    Monthly {
        #[command(flatten)]
        filter: FilterArgs,
        /// Also write the monthly table as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Who should pay whom
    Settle {
        /// Only this month ("Jan 2025" or "2025-01")
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Every aggregate as JSON
    Json {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> HouseshareResult<()> {
    let expenses = storage.expenses.get_all()?;

    match cmd {
        ReportCommands::Summary { month, csv } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let report = SummaryReport::generate(&expenses, settings, month);
            print!("{}", report.format_terminal());

            if let Some(path) = csv {
                report.export_csv(create_file(&path)?)?;
                println!("\nSummary written to {}", path.display());
            }
        }

        ReportCommands::Categories { filter } => {
            let snapshot = filter.to_filter()?.apply(&expenses);
            let report = ChartsReport::generate(&snapshot, settings);
            print!("{}\n{}", report.format_categories(), report.format_people());
        }

        ReportCommands::Monthly { filter, csv } => {
            let snapshot = filter.to_filter()?.apply(&expenses);
            let report = ChartsReport::generate(&snapshot, settings);
            print!("{}", report.format_monthly());

            if let Some(path) = csv {
                report.export_csv(create_file(&path)?)?;
                println!("\nMonthly breakdown written to {}", path.display());
            }
        }

        ReportCommands::Settle { month } => {
            let mut filter = ExpenseFilter::new();
            if let Some(month) = month.as_deref() {
                filter = filter.month(parse_month(month)?);
            }
            let plan = settlement_plan(&filter.apply(&expenses), &settings.roommates);
            let fmt = MoneyFormat::new(settings.currency_symbol.as_str(), settings.number_grouping);
            print!("{}", format_transfers(&plan, &fmt));
        }

        ReportCommands::Json { filter } => {
            let aggregates = aggregate(
                &expenses,
                &settings.roommates,
                &settings.categories,
                &filter.to_filter()?,
                settings.month_window,
            );
            println!("{}", serde_json::to_string_pretty(&aggregates)?);
        }
    }

    Ok(())
}

fn create_file(path: &Path) -> HouseshareResult<File> {
    File::create(path)
        .map_err(|e| HouseshareError::Export(format!("Failed to create {}: {}", path.display(), e)))
}
