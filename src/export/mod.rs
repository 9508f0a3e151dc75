//! Export module for houseshare
//!
//! - CSV: the expense list, spreadsheet-compatible and re-importable
//! - JSON: settings plus every expense, machine-readable
//! - YAML: the same, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{default_filename, export_expenses_csv, EXPENSE_CSV_HEADERS};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
