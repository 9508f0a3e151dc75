//! Expense service
//!
//! Validated create/update/delete over the expense repository. Every
//! mutation requires a manager session and is written to the audit log.

use chrono::{NaiveDate, Utc};

use crate::audit::AuditEntry;
use crate::config::settings::Settings;
use crate::engine::ExpenseFilter;
use crate::error::{HouseshareError, HouseshareResult};
use crate::models::{Expense, ExpenseId, Money, Session};
use crate::storage::Storage;

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Money,
    pub paid_by: String,
}

/// Partial update; unset fields are left alone
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub paid_by: Option<String>,
}

impl UpdateExpenseInput {
    /// Whether nothing would change
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.paid_by.is_none()
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    session: &'a Session,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage, settings: &'a Settings, session: &'a Session) -> Self {
        Self {
            storage,
            settings,
            session,
        }
    }

    /// Record a new expense
    pub fn create(&self, input: CreateExpenseInput) -> HouseshareResult<Expense> {
        self.session.require_manager("adding expenses")?;

        let expense = Expense::new(
            input.date,
            input.description.trim(),
            input.category.trim(),
            input.amount,
            input.paid_by.trim(),
        );
        self.check(&expense)?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.audit().log(&AuditEntry::expense_added(&expense))?;

        tracing::info!(id = %expense.id, amount = %expense.amount, paid_by = %expense.paid_by, "expense added");
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> HouseshareResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full UUID or by a unique short prefix (`exp-1a2b`)
    pub fn find(&self, identifier: &str) -> HouseshareResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            if let Some(expense) = self.storage.expenses.get(id)? {
                return Ok(Some(expense));
            }
        }

        let mut matches = self.storage.expenses.find_by_prefix(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(HouseshareError::Validation(format!(
                "'{}' matches {} expenses; use a longer ID",
                identifier, n
            ))),
        }
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn require(&self, identifier: &str) -> HouseshareResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| HouseshareError::expense_not_found(identifier))
    }

    /// Current snapshot filtered, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> HouseshareResult<Vec<Expense>> {
        Ok(filter.apply(&self.storage.expenses.get_all()?))
    }

    /// Current snapshot, newest first
    pub fn snapshot(&self) -> HouseshareResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Apply a partial update
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> HouseshareResult<Expense> {
        self.session.require_manager("editing expenses")?;

        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| HouseshareError::expense_not_found(id.to_string()))?;
        let before = expense.clone();

        if let Some(date) = input.date {
            expense.set_date(date);
        }
        if let Some(description) = input.description {
            expense.description = description.trim().to_string();
        }
        if let Some(category) = input.category {
            expense.category = category.trim().to_string();
        }
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(paid_by) = input.paid_by {
            expense.paid_by = paid_by.trim().to_string();
        }
        expense.updated_at = Utc::now();

        self.check(&expense)?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage
            .audit()
            .log(&AuditEntry::expense_edited(&before, &expense))?;

        Ok(expense)
    }

    /// Delete an expense, returning what was removed
    pub fn delete(&self, id: ExpenseId) -> HouseshareResult<Expense> {
        self.session.require_manager("deleting expenses")?;

        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| HouseshareError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.audit().log(&AuditEntry::expense_deleted(&expense))?;

        Ok(expense)
    }

    /// Audit trail of one expense, oldest first
    pub fn history(&self, id: ExpenseId) -> HouseshareResult<Vec<AuditEntry>> {
        self.storage.audit().read_for_record(&id.to_string())
    }

    fn check(&self, expense: &Expense) -> HouseshareResult<()> {
        expense
            .validate()
            .map_err(|e| HouseshareError::Validation(e.to_string()))?;

        if !self.settings.has_roommate(&expense.paid_by) {
            return Err(HouseshareError::roommate_not_found(&expense.paid_by));
        }
        if !self.settings.has_category(&expense.category) {
            tracing::warn!(category = %expense.category, "category is not configured");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditAction;
    use crate::config::paths::HousesharePaths;
    use crate::models::MonthLabel;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HousesharePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage, Settings::default())
    }

    fn input(description: &str, units: i64, paid_by: &str) -> CreateExpenseInput {
        CreateExpenseInput {
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            description: description.into(),
            category: "Rent".into(),
            amount: Money::from_units(units),
            paid_by: paid_by.into(),
        }
    }

    #[test]
    fn test_create_derives_month_and_audits() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ExpenseService::new(&storage, &settings, &session);

        let expense = service.create(input("  January rent ", 15000, "Amith")).unwrap();

        assert_eq!(expense.description, "January rent");
        assert_eq!(expense.month, MonthLabel::new(2025, 1).unwrap());
        assert_eq!(storage.expenses.count().unwrap(), 1);

        let history = service.history(expense.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::ExpenseAdded);
        assert_eq!(history[0].amount, Some(Money::from_units(15000)));
    }

    #[test]
    fn test_create_validation() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ExpenseService::new(&storage, &settings, &session);

        assert!(service.create(input("", 100, "Amith")).unwrap_err().is_validation());
        assert!(service.create(input("Rent", 0, "Amith")).unwrap_err().is_validation());
        assert!(service.create(input("Rent", -5, "Amith")).unwrap_err().is_validation());
        assert!(service.create(input("Rent", 100, "Stranger")).unwrap_err().is_not_found());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_viewer_cannot_mutate() {
        let (_temp, storage, settings) = setup();
        let manager = Session::manager();
        let created = ExpenseService::new(&storage, &settings, &manager)
            .create(input("Rent", 100, "Amith"))
            .unwrap();

        let viewer = Session::viewer();
        let service = ExpenseService::new(&storage, &settings, &viewer);

        assert!(service.create(input("Food", 10, "Amith")).unwrap_err().is_permission_denied());
        assert!(service
            .update(created.id, UpdateExpenseInput::default())
            .unwrap_err()
            .is_permission_denied());
        assert!(service.delete(created.id).unwrap_err().is_permission_denied());

        // Reads stay open
        assert_eq!(service.list(&ExpenseFilter::new()).unwrap().len(), 1);
    }

    #[test]
    fn test_update_rederives_month() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ExpenseService::new(&storage, &settings, &session);
        let created = service.create(input("Rent", 100, "Amith")).unwrap();

        let updated = service
            .update(
                created.id,
                UpdateExpenseInput {
                    date: NaiveDate::from_ymd_opt(2025, 2, 3),
                    amount: Some(Money::from_units(120)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.month, MonthLabel::new(2025, 2).unwrap());
        assert_eq!(updated.amount, Money::from_units(120));

        let history = service.history(created.id).unwrap();
        assert_eq!(history.len(), 2);
        let diff = history[1].changes.as_deref().unwrap();
        assert!(diff.contains("date: 2025-01-15 -> 2025-02-03"));
        assert!(diff.contains("amount: 100.00 -> 120.00"));
    }

    #[test]
    fn test_update_rejects_unknown_payer() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ExpenseService::new(&storage, &settings, &session);
        let created = service.create(input("Rent", 100, "Amith")).unwrap();

        let result = service.update(
            created.id,
            UpdateExpenseInput {
                paid_by: Some("Ghost".into()),
                ..Default::default()
            },
        );
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(service.get(created.id).unwrap().unwrap().paid_by, "Amith");
    }

    #[test]
    fn test_find_and_delete() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ExpenseService::new(&storage, &settings, &session);
        let created = service.create(input("Internet", 999, "Anusha")).unwrap();

        let short = created.id.to_string();
        assert_eq!(service.find(&short).unwrap().unwrap().id, created.id);
        assert_eq!(
            service.find(&created.id.as_uuid().to_string()).unwrap().unwrap().id,
            created.id
        );

        let deleted = service.delete(created.id).unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(service.find(&short).unwrap().is_none());
        assert!(service.require(&short).unwrap_err().is_not_found());
        assert!(service.delete(created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_applies_filter() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ExpenseService::new(&storage, &settings, &session);
        service.create(input("Rent", 100, "Amith")).unwrap();
        service.create(input("Wifi", 50, "Anusha")).unwrap();

        let filter = ExpenseFilter::new().paid_by("Anusha");
        let listed = service.list(&filter).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description, "Wifi");

        let filter = ExpenseFilter::new().search("WIFI");
        assert_eq!(service.list(&filter).unwrap().len(), 1);
    }
}
