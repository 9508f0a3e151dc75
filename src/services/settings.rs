//! Settings service
//!
//! Roster, category and display changes. Each change is validated, saved,
//! and written to the audit log with a diff.

use crate::audit::AuditEntry;
use crate::config::settings::Settings;
use crate::error::{HouseshareError, HouseshareResult};
use crate::models::{Money, NumberGrouping, Session};
use crate::storage::Storage;

/// Service for household settings
pub struct SettingsService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> SettingsService<'a> {
    /// Create a new settings service
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    /// Add a roommate; returns the trimmed name
    pub fn add_roommate(&self, settings: &mut Settings, name: &str) -> HouseshareResult<String> {
        self.change(settings, "changing roommates", |s| s.add_roommate(name))
    }

    /// Remove a roommate. Their past expenses stay but no longer count.
    pub fn remove_roommate(&self, settings: &mut Settings, name: &str) -> HouseshareResult<()> {
        self.change(settings, "changing roommates", |s| s.remove_roommate(name))?;

        let orphaned = self.storage.expenses.get_by_payer(name)?.len();
        if orphaned > 0 {
            tracing::warn!(roommate = name, expenses = orphaned, "removed roommate still has expenses");
        }
        Ok(())
    }

    /// Add a category; returns the trimmed name
    pub fn add_category(&self, settings: &mut Settings, name: &str) -> HouseshareResult<String> {
        self.change(settings, "changing categories", |s| s.add_category(name))
    }

    /// Remove a category
    pub fn remove_category(&self, settings: &mut Settings, name: &str) -> HouseshareResult<()> {
        self.change(settings, "changing categories", |s| s.remove_category(name))
    }

    /// Set the display currency symbol
    pub fn set_currency(&self, settings: &mut Settings, symbol: &str) -> HouseshareResult<()> {
        self.change(settings, "changing settings", |s| {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                return Err(HouseshareError::Validation(
                    "Currency symbol cannot be empty".into(),
                ));
            }
            s.currency_symbol = symbol.to_string();
            Ok(())
        })
    }

    /// Set the large-expense threshold; zero turns highlighting off
    pub fn set_threshold(&self, settings: &mut Settings, threshold: Money) -> HouseshareResult<()> {
        self.change(settings, "changing settings", |s| {
            if threshold.is_negative() {
                return Err(HouseshareError::Validation(
                    "Threshold cannot be negative".into(),
                ));
            }
            s.large_expense_threshold = threshold;
            Ok(())
        })
    }

    /// Set how many recent months the monthly breakdown shows
    pub fn set_month_window(&self, settings: &mut Settings, months: usize) -> HouseshareResult<()> {
        self.change(settings, "changing settings", |s| {
            if months == 0 {
                return Err(HouseshareError::Validation(
                    "Month window must be at least 1".into(),
                ));
            }
            s.month_window = months;
            Ok(())
        })
    }

    /// Set digit grouping for amounts
    pub fn set_number_grouping(
        &self,
        settings: &mut Settings,
        grouping: NumberGrouping,
    ) -> HouseshareResult<()> {
        self.change(settings, "changing settings", |s| {
            s.number_grouping = grouping;
            Ok(())
        })
    }

    /// Apply `edit` to a copy, validate, persist, commit to `settings`, then audit.
    ///
    /// Once the file is saved the change stands; a failed audit write is
    /// logged rather than leaving `settings` behind what is on disk.
    fn change<T>(
        &self,
        settings: &mut Settings,
        action: &str,
        edit: impl FnOnce(&mut Settings) -> HouseshareResult<T>,
    ) -> HouseshareResult<T> {
        self.session.require_manager(action)?;

        let mut updated = settings.clone();
        let result = edit(&mut updated)?;
        updated.validate()?;
        updated.save(self.storage.paths())?;

        let entry = AuditEntry::settings_changed(settings, &updated);
        *settings = updated;

        if let Err(e) = self.storage.audit().log(&entry) {
            tracing::warn!(error = %e, action, "settings saved but audit entry was not written");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditAction;
    use crate::config::paths::HousesharePaths;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HousesharePaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, Storage::new(paths).unwrap())
    }

    #[test]
    fn test_add_roommate_persists_and_audits() {
        let (_temp, storage) = setup();
        let session = Session::manager();
        let service = SettingsService::new(&storage, &session);
        let mut settings = Settings::default();

        assert_eq!(service.add_roommate(&mut settings, " Priya ").unwrap(), "Priya");

        let reloaded = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(reloaded.roommates, vec!["Amith", "Anusha", "Priya"]);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::SettingsChanged);
        assert!(entries[0].changes.as_deref().unwrap().contains("Priya"));
    }

    #[test]
    fn test_saved_change_survives_audit_failure() {
        let (_temp, storage) = setup();
        let session = Session::manager();
        let service = SettingsService::new(&storage, &session);
        let mut settings = Settings::default();

        // A directory where the log file should be makes every append fail
        std::fs::create_dir(storage.paths().audit_log()).unwrap();

        service.set_currency(&mut settings, "$").unwrap();

        let reloaded = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_failed_change_leaves_settings_untouched() {
        let (_temp, storage) = setup();
        let session = Session::manager();
        let service = SettingsService::new(&storage, &session);
        let mut settings = Settings::default();

        assert!(service.add_roommate(&mut settings, "Amith").is_err());
        assert!(service.set_month_window(&mut settings, 0).unwrap_err().is_validation());
        assert!(service
            .set_threshold(&mut settings, Money::from_units(-1))
            .unwrap_err()
            .is_validation());

        assert_eq!(settings, Settings::default());
        assert!(storage.audit().read_all().unwrap().is_empty());
        assert!(!storage.paths().settings_file().exists());
    }

    #[test]
    fn test_last_roommate_and_category_stay() {
        let (_temp, storage) = setup();
        let session = Session::manager();
        let service = SettingsService::new(&storage, &session);
        let mut settings = Settings::default();

        service.remove_roommate(&mut settings, "Amith").unwrap();
        assert!(service.remove_roommate(&mut settings, "Anusha").is_err());

        for category in Settings::default().categories.iter().skip(1) {
            service.remove_category(&mut settings, category).unwrap();
        }
        assert!(service.remove_category(&mut settings, "Rent").is_err());
        assert_eq!(settings.categories, vec!["Rent"]);
    }

    #[test]
    fn test_display_settings() {
        let (_temp, storage) = setup();
        let session = Session::manager();
        let service = SettingsService::new(&storage, &session);
        let mut settings = Settings::default();

        service.set_currency(&mut settings, "$").unwrap();
        service.set_threshold(&mut settings, Money::from_units(200)).unwrap();
        service.set_month_window(&mut settings, 3).unwrap();
        service
            .set_number_grouping(&mut settings, NumberGrouping::Western)
            .unwrap();

        assert_eq!(settings.format_money(Money::from_units(123456)), "$123,456.00");
        assert_eq!(settings.month_window, 3);
        assert!(service.set_currency(&mut settings, "  ").is_err());
    }

    #[test]
    fn test_viewer_cannot_change_settings() {
        let (_temp, storage) = setup();
        let session = Session::viewer();
        let service = SettingsService::new(&storage, &session);
        let mut settings = Settings::default();

        assert!(service
            .add_category(&mut settings, "Cleaning")
            .unwrap_err()
            .is_permission_denied());
        assert!(!settings.has_category("Cleaning"));
    }
}
