//! JSON export of the whole household
//!
//! Settings plus every expense, with a schema version for compatibility
//! checking.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::error::{HouseshareError, HouseshareResult};
use crate::models::{Expense, Money};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full household export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of houseshare that wrote the export
    pub app_version: String,
    pub settings: Settings,
    pub expenses: Vec<Expense>,
    pub metadata: ExportMetadata,
}

/// Summary figures for a quick look at an export file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub total_spent: Money,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Build an export from a settings and expense snapshot
    pub fn new(settings: &Settings, expenses: &[Expense]) -> Self {
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            settings: settings.clone(),
            expenses: expenses.to_vec(),
            metadata,
        }
    }
}

/// Write the full export as JSON
pub fn export_full_json<W: Write>(
    settings: &Settings,
    expenses: &[Expense],
    writer: W,
    pretty: bool,
) -> HouseshareResult<()> {
    let export = FullExport::new(settings, expenses);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| HouseshareError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expenses() -> Vec<Expense> {
        vec![
            Expense::new(
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
                "Groceries",
                "Groceries",
                Money::from_units(500),
                "Anusha",
            ),
            Expense::new(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                "Rent",
                "Rent",
                Money::from_units(15000),
                "Amith",
            ),
        ]
    }

    #[test]
    fn test_metadata() {
        let export = FullExport::new(&Settings::default(), &expenses());

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 2);
        assert_eq!(export.metadata.total_spent, Money::from_units(15500));
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2025-01-05"));
        assert_eq!(export.metadata.latest_expense.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_export_reads_back() {
        let original = expenses();
        let mut buffer = Vec::new();
        export_full_json(&Settings::default(), &original, &mut buffer, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.expenses, original);
        assert_eq!(parsed.settings, Settings::default());
    }

    #[test]
    fn test_empty_export() {
        let export = FullExport::new(&Settings::default(), &[]);
        assert!(export.metadata.earliest_expense.is_none());
        assert!(export.metadata.total_spent.is_zero());
    }
}
