//! Audit log records
//!
//! Each line of `audit.log` is one `AuditEntry`: an expense that was added,
//! edited or deleted, or a change to the household settings. Expense entries
//! carry the amount and payer so the log reads as a ledger on its own.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::models::{Expense, Money};

use super::diff::{describe_expense_changes, generate_diff};

/// Record id used for settings entries
pub const SETTINGS_RECORD: &str = "settings";

/// What happened to the household's records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ExpenseAdded,
    ExpenseEdited,
    ExpenseDeleted,
    SettingsChanged,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuditAction::ExpenseAdded => "added expense",
            AuditAction::ExpenseEdited => "edited expense",
            AuditAction::ExpenseDeleted => "deleted expense",
            AuditAction::SettingsChanged => "changed settings",
        };
        f.write_str(label)
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change was made (UTC)
    pub timestamp: DateTime<Utc>,

    pub action: AuditAction,

    /// Expense id, or [`SETTINGS_RECORD`]
    pub record: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expense amount after the change (the removed amount for deletes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_by: Option<String>,

    /// "field: old -> new" pairs, comma separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,

    /// The full record as it was before an edit or delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<serde_json::Value>,
}

impl AuditEntry {
    fn for_expense(action: AuditAction, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            record: expense.id.to_string(),
            description: Some(expense.description.clone()),
            amount: Some(expense.amount),
            paid_by: Some(expense.paid_by.clone()),
            changes: None,
            previous: None,
        }
    }

    pub fn expense_added(expense: &Expense) -> Self {
        Self::for_expense(AuditAction::ExpenseAdded, expense)
    }

    pub fn expense_edited(before: &Expense, after: &Expense) -> Self {
        Self {
            changes: describe_expense_changes(before, after),
            previous: serde_json::to_value(before).ok(),
            ..Self::for_expense(AuditAction::ExpenseEdited, after)
        }
    }

    pub fn expense_deleted(expense: &Expense) -> Self {
        Self {
            previous: serde_json::to_value(expense).ok(),
            ..Self::for_expense(AuditAction::ExpenseDeleted, expense)
        }
    }

    pub fn settings_changed(before: &Settings, after: &Settings) -> Self {
        let before = serde_json::to_value(before).unwrap_or_default();
        let after = serde_json::to_value(after).unwrap_or_default();

        Self {
            timestamp: Utc::now(),
            action: AuditAction::SettingsChanged,
            record: SETTINGS_RECORD.to_string(),
            description: None,
            amount: None,
            paid_by: None,
            changes: generate_diff(&before, &after),
            previous: Some(before),
        }
    }

    /// "Wifi bill, 999.00 paid by Amith" for expense entries
    pub fn summary(&self) -> Option<String> {
        let description = self.description.as_deref()?;
        Some(match (self.amount, self.paid_by.as_deref()) {
            (Some(amount), Some(payer)) => format!("{}, {} paid by {}", description, amount, payer),
            (Some(amount), None) => format!("{}, {}", description, amount),
            _ => description.to_string(),
        })
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action
        )?;

        if self.action != AuditAction::SettingsChanged {
            write!(f, " {}", self.record)?;
        }
        if let Some(summary) = self.summary() {
            write!(f, ": {}", summary)?;
        }
        if let Some(changes) = &self.changes {
            write!(f, "\n  Changes: {}", changes)?;
        }

        Ok(())
    }
}
