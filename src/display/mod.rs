//! Display formatting for terminal output
//!
//! Tables and detail views for expenses, plus the shared helpers the
//! reports use for amounts, bars and separators.

pub mod expense;
pub mod report;

pub use expense::{format_expense_details, format_expense_table, format_settings, LARGE_MARKER};
pub use report::MoneyFormat;
