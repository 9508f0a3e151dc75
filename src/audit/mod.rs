//! Audit logging for houseshare
//!
//! Every added, edited or deleted expense, and every settings change, is
//! appended to `audit.log`.
//!
//! - `AuditEntry`: one change, with amount and payer for expenses
//! - `AuditLogger`: JSONL reader/writer for the log file
//! - `describe_expense_changes` / `generate_diff`: one-line summaries of an edit

mod diff;
mod entry;
mod logger;

pub use diff::{describe_expense_changes, generate_diff};
pub use entry::{AuditAction, AuditEntry, SETTINGS_RECORD};
pub use logger::AuditLogger;
