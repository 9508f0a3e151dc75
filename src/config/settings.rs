//! Household settings
//!
//! The roster, the category list, and display preferences. Settings are a
//! snapshot input to the engine just like the expense list.

use serde::{Deserialize, Serialize};

use super::paths::HousesharePaths;
use crate::engine::DEFAULT_MONTH_WINDOW;
use crate::error::HouseshareError;
use crate::models::{Money, NumberGrouping};

/// Household settings for houseshare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Roommates sharing expenses, in display order
    #[serde(default = "default_roommates")]
    pub roommates: Vec<String>,

    /// Expense categories, in display order
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Currency symbol used for display only
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Expenses at or above this amount are highlighted
    #[serde(default = "default_threshold")]
    pub large_expense_threshold: Money,

    /// Number of recent months shown in the monthly breakdown
    #[serde(default = "default_month_window")]
    pub month_window: usize,

    /// Digit grouping for amounts
    #[serde(default)]
    pub number_grouping: NumberGrouping,

    /// Date format for listings (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_roommates() -> Vec<String> {
    vec!["Amith".to_string(), "Anusha".to_string()]
}

fn default_categories() -> Vec<String> {
    ["Rent", "Food", "Electricity", "Internet", "Groceries", "Others"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_threshold() -> Money {
    Money::from_units(5000)
}

fn default_month_window() -> usize {
    DEFAULT_MONTH_WINDOW
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            roommates: default_roommates(),
            categories: default_categories(),
            currency_symbol: default_currency(),
            large_expense_threshold: default_threshold(),
            month_window: default_month_window(),
            number_grouping: NumberGrouping::default(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &HousesharePaths) -> Result<Self, HouseshareError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                HouseshareError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                HouseshareError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HousesharePaths) -> Result<(), HouseshareError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            HouseshareError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            HouseshareError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check the roster and category invariants
    pub fn validate(&self) -> Result<(), HouseshareError> {
        validate_names("roommate", &self.roommates)?;
        validate_names("category", &self.categories)?;

        if self.month_window == 0 {
            return Err(HouseshareError::Config(
                "month_window must be at least 1".into(),
            ));
        }
        if self.large_expense_threshold.is_negative() {
            return Err(HouseshareError::Config(
                "large_expense_threshold cannot be negative".into(),
            ));
        }
        Ok(())
    }

    /// Check if a name is on the roster
    pub fn has_roommate(&self, name: &str) -> bool {
        self.roommates.iter().any(|r| r == name)
    }

    /// Check if a category is configured
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// Add a roommate to the end of the roster
    pub fn add_roommate(&mut self, name: &str) -> Result<String, HouseshareError> {
        add_name("Roommate", &mut self.roommates, name)
    }

    /// Remove a roommate; the last one cannot be removed
    pub fn remove_roommate(&mut self, name: &str) -> Result<(), HouseshareError> {
        if !self.has_roommate(name) {
            return Err(HouseshareError::roommate_not_found(name));
        }
        remove_name("roommate", &mut self.roommates, name)
    }

    /// Add a category to the end of the list
    pub fn add_category(&mut self, name: &str) -> Result<String, HouseshareError> {
        add_name("Category", &mut self.categories, name)
    }

    /// Remove a category; the last one cannot be removed
    pub fn remove_category(&mut self, name: &str) -> Result<(), HouseshareError> {
        if !self.has_category(name) {
            return Err(HouseshareError::category_not_found(name));
        }
        remove_name("category", &mut self.categories, name)
    }

    /// Format an amount with the configured symbol and grouping
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_grouped(&self.currency_symbol, self.number_grouping)
    }
}

fn validate_names(kind: &str, names: &[String]) -> Result<(), HouseshareError> {
    if names.is_empty() {
        return Err(HouseshareError::Config(format!(
            "At least one {} is required",
            kind
        )));
    }
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() || name.trim() != name {
            return Err(HouseshareError::Config(format!(
                "Invalid {} name: '{}'",
                kind, name
            )));
        }
        if names[..i].contains(name) {
            return Err(HouseshareError::Config(format!(
                "Duplicate {}: '{}'",
                kind, name
            )));
        }
    }
    Ok(())
}

fn add_name(
    entity_type: &'static str,
    names: &mut Vec<String>,
    name: &str,
) -> Result<String, HouseshareError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HouseshareError::Validation(format!(
            "{} name cannot be empty",
            entity_type
        )));
    }
    if names.iter().any(|n| n == name) {
        return Err(HouseshareError::Duplicate {
            entity_type,
            identifier: name.to_string(),
        });
    }
    names.push(name.to_string());
    Ok(name.to_string())
}

fn remove_name(kind: &str, names: &mut Vec<String>, name: &str) -> Result<(), HouseshareError> {
    if names.len() <= 1 {
        return Err(HouseshareError::Validation(format!(
            "Cannot remove the last {}",
            kind
        )));
    }
    names.retain(|n| n != name);
    Ok(())
}
