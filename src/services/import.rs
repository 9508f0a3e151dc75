//! CSV import service
//!
//! Reads expenses in the same layout the CSV export writes
//! (`Date, Description, Category, Amount, Paid By[, Month]`), previews each
//! row, skips duplicates, and imports the rest in one batch.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::audit::AuditEntry;
use crate::config::settings::Settings;
use crate::error::{HouseshareError, HouseshareResult};
use crate::models::{Expense, Money, Session};
use crate::storage::Storage;

/// Date formats accepted in the Date column, tried in order
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d %b %Y", "%d-%m-%Y"];

/// Column positions resolved from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub description: usize,
    pub category: usize,
    pub amount: usize,
    pub paid_by: usize,
}

impl ColumnMapping {
    /// Locate the required columns by header name (case-insensitive).
    /// The Month column, if present, is ignored; it is derived from the date.
    pub fn from_headers(headers: &StringRecord) -> HouseshareResult<Self> {
        Ok(Self {
            date: find_column(headers, &["date"], "Date")?,
            description: find_column(headers, &["description"], "Description")?,
            category: find_column(headers, &["category"], "Category")?,
            amount: find_column(headers, &["amount"], "Amount")?,
            paid_by: find_column(headers, &["paid by", "paid_by", "payer"], "Paid By")?,
        })
    }
}

fn find_column(headers: &StringRecord, names: &[&str], label: &str) -> HouseshareResult<usize> {
    headers
        .iter()
        .position(|h| {
            let h = h.trim().to_lowercase();
            names.iter().any(|n| h == *n)
        })
        .ok_or_else(|| HouseshareError::Import(format!("Missing required column '{}'", label)))
}

/// A parsed row before import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExpense {
    /// Data row number, 1-based, not counting the header
    pub row_number: usize,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Money,
    pub paid_by: String,
}

impl ParsedExpense {
    fn to_expense(&self) -> Expense {
        Expense::new(
            self.date,
            self.description.as_str(),
            self.category.as_str(),
            self.amount,
            self.paid_by.as_str(),
        )
    }
}

/// What will happen to a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    New,
    /// Same date, description, amount and payer as an existing or earlier row
    Duplicate,
    Error(String),
}

/// One row of the import preview
#[derive(Debug, Clone)]
pub struct ImportPreviewEntry {
    pub row_number: usize,
    /// `None` when the row could not be parsed
    pub expense: Option<ParsedExpense>,
    pub status: ImportStatus,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates_skipped: usize,
    pub errors: usize,
    /// `(row_number, message)` for every rejected row
    pub error_messages: Vec<(usize, String)>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    session: &'a Session,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage, settings: &'a Settings, session: &'a Session) -> Self {
        Self {
            storage,
            settings,
            session,
        }
    }

    /// Parse CSV data into rows. A broken row is an `Err` entry, not a failure.
    pub fn parse_csv<R: Read>(
        &self,
        reader: R,
    ) -> HouseshareResult<Vec<Result<ParsedExpense, (usize, String)>>> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| HouseshareError::Import(format!("Failed to read header row: {}", e)))?
            .clone();
        let mapping = ColumnMapping::from_headers(&headers)?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let row_number = index + 1;
            let parsed = record
                .map_err(|e| format!("Unreadable row: {}", e))
                .and_then(|record| parse_record(&record, &mapping, row_number))
                .map_err(|message| (row_number, message));
            rows.push(parsed);
        }
        Ok(rows)
    }

    /// Mark each parsed row as new, duplicate, or invalid
    pub fn preview(
        &self,
        parsed: &[Result<ParsedExpense, (usize, String)>],
    ) -> HouseshareResult<Vec<ImportPreviewEntry>> {
        let mut seen: HashSet<_> = self
            .storage
            .expenses
            .get_all()?
            .iter()
            .map(Expense::duplicate_key)
            .collect();

        let mut preview = Vec::with_capacity(parsed.len());
        for row in parsed {
            let entry = match row {
                Err((row_number, message)) => ImportPreviewEntry {
                    row_number: *row_number,
                    expense: None,
                    status: ImportStatus::Error(message.clone()),
                },
                Ok(parsed) => {
                    let status = match self.check_row(parsed) {
                        Err(message) => ImportStatus::Error(message),
                        Ok(key) => {
                            if seen.insert(key) {
                                ImportStatus::New
                            } else {
                                ImportStatus::Duplicate
                            }
                        }
                    };
                    ImportPreviewEntry {
                        row_number: parsed.row_number,
                        expense: Some(parsed.clone()),
                        status,
                    }
                }
            };
            preview.push(entry);
        }
        Ok(preview)
    }

    /// Import every `New` row of a preview in one save
    pub fn import(&self, preview: &[ImportPreviewEntry]) -> HouseshareResult<ImportResult> {
        self.session.require_manager("importing expenses")?;

        let mut result = ImportResult::default();
        let mut audit_entries = Vec::new();

        for entry in preview {
            match (&entry.status, &entry.expense) {
                (ImportStatus::New, Some(parsed)) => {
                    let expense = parsed.to_expense();
                    self.storage.expenses.upsert(expense.clone())?;
                    audit_entries.push(AuditEntry::expense_added(&expense));
                    result.imported += 1;
                }
                (ImportStatus::Duplicate, _) => result.duplicates_skipped += 1,
                (ImportStatus::Error(message), _) => {
                    result.errors += 1;
                    result.error_messages.push((entry.row_number, message.clone()));
                }
                (ImportStatus::New, None) => {
                    result.errors += 1;
                    result
                        .error_messages
                        .push((entry.row_number, "Row has no data".into()));
                }
            }
        }

        if result.imported > 0 {
            self.storage.expenses.save()?;
            self.storage.audit().log_batch(&audit_entries)?;
        }

        tracing::info!(
            imported = result.imported,
            duplicates = result.duplicates_skipped,
            errors = result.errors,
            "import finished"
        );
        Ok(result)
    }

    /// Parse, preview and import a CSV file
    pub fn import_file(&self, path: &Path) -> HouseshareResult<ImportResult> {
        self.session.require_manager("importing expenses")?;

        let file = std::fs::File::open(path).map_err(|e| {
            HouseshareError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let parsed = self.parse_csv(file)?;
        let preview = self.preview(&parsed)?;
        self.import(&preview)
    }

    fn check_row(
        &self,
        parsed: &ParsedExpense,
    ) -> Result<(NaiveDate, String, Money, String), String> {
        let expense = parsed.to_expense();
        expense.validate().map_err(|e| e.to_string())?;
        if !self.settings.has_roommate(&expense.paid_by) {
            return Err(format!("'{}' is not a roommate", expense.paid_by));
        }
        Ok(expense.duplicate_key())
    }
}

fn parse_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
    row_number: usize,
) -> Result<ParsedExpense, String> {
    let field = |index: usize, label: &str| {
        record
            .get(index)
            .map(str::to_string)
            .ok_or_else(|| format!("Missing {} value", label))
    };

    let date_text = field(mapping.date, "Date")?;
    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&date_text, format).ok())
        .ok_or_else(|| format!("Could not parse date: '{}'", date_text))?;

    let amount_text = field(mapping.amount, "Amount")?;
    let amount = Money::parse(&amount_text)
        .map_err(|e| format!("Could not parse amount '{}': {}", amount_text, e))?;

    Ok(ParsedExpense {
        row_number,
        date,
        description: field(mapping.description, "Description")?,
        category: field(mapping.category, "Category")?,
        amount,
        paid_by: field(mapping.paid_by, "Paid By")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HousesharePaths;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
Date,Description,Category,Amount,Paid By,Month
2025-01-01,January rent,Rent,15000.00,Amith,Jan 2025
2025-01-03,Veggies,Groceries,\"1,250.50\",Anusha,Jan 2025
2025-01-03,Veggies,Groceries,1250.50,Anusha,Jan 2025
not-a-date,Broken,Food,10,Amith,
2025-01-05,Guest dinner,Food,800,Guest,Jan 2025
2025-01-06,Free sample,Food,0,Amith,Jan 2025
";

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HousesharePaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, Storage::new(paths).unwrap(), Settings::default())
    }

    #[test]
    fn test_mapping_from_headers() {
        let headers = StringRecord::from(vec!["paid by", "AMOUNT", "date", "Category", "Description"]);
        let mapping = ColumnMapping::from_headers(&headers).unwrap();
        assert_eq!(mapping.paid_by, 0);
        assert_eq!(mapping.amount, 1);
        assert_eq!(mapping.description, 4);

        let missing = StringRecord::from(vec!["Date", "Amount"]);
        assert!(matches!(
            ColumnMapping::from_headers(&missing),
            Err(HouseshareError::Import(_))
        ));
    }

    #[test]
    fn test_preview_statuses() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ImportService::new(&storage, &settings, &session);

        let parsed = service.parse_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 6);

        let preview = service.preview(&parsed).unwrap();
        let statuses: Vec<_> = preview.iter().map(|p| &p.status).collect();

        assert_eq!(statuses[0], &ImportStatus::New);
        assert_eq!(statuses[1], &ImportStatus::New);
        assert_eq!(statuses[2], &ImportStatus::Duplicate);
        assert!(matches!(statuses[3], ImportStatus::Error(m) if m.contains("date")));
        assert!(matches!(statuses[4], ImportStatus::Error(m) if m.contains("Guest")));
        assert!(matches!(statuses[5], ImportStatus::Error(_)));

        assert_eq!(
            preview[1].expense.as_ref().unwrap().amount,
            Money::from_cents(125_050)
        );
    }

    #[test]
    fn test_repeated_row_is_duplicate() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ImportService::new(&storage, &settings, &session);

        let data = "Date,Description,Category,Amount,Paid By\n\
2025-03-01,Wifi,Internet,999,Amith\n\
2025-03-01,Wifi,Internet,999,Amith\n";
        let preview = service.preview(&service.parse_csv(data.as_bytes()).unwrap()).unwrap();

        let statuses: Vec<_> = preview.iter().map(|p| p.status.clone()).collect();
        assert_eq!(statuses, vec![ImportStatus::New, ImportStatus::Duplicate]);
    }

    #[test]
    fn test_oversized_amount_is_an_error() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ImportService::new(&storage, &settings, &session);

        let data = "Date,Description,Category,Amount,Paid By\n\
2025-03-01,Typo,Rent,50000000000000000,Amith\n\
2025-03-02,Rent,Rent,15000,Amith\n";
        let preview = service.preview(&service.parse_csv(data.as_bytes()).unwrap()).unwrap();

        assert!(matches!(&preview[0].status, ImportStatus::Error(m) if m.contains("above the limit")));
        assert_eq!(preview[1].status, ImportStatus::New);

        let result = service.import(&preview).unwrap();
        assert_eq!((result.imported, result.errors), (1, 1));
    }

    #[test]
    fn test_import_and_reimport() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ImportService::new(&storage, &settings, &session);

        let preview = service.preview(&service.parse_csv(SAMPLE.as_bytes()).unwrap()).unwrap();
        let result = service.import(&preview).unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.duplicates_skipped, 1);
        assert_eq!(result.errors, 3);
        assert_eq!(result.error_messages[0].0, 4);
        assert_eq!(storage.expenses.count().unwrap(), 2);
        assert_eq!(storage.audit().entry_count().unwrap(), 2);

        // Everything already present the second time round
        let preview = service.preview(&service.parse_csv(SAMPLE.as_bytes()).unwrap()).unwrap();
        let again = service.import(&preview).unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.duplicates_skipped, 3);
        assert_eq!(storage.expenses.count().unwrap(), 2);
    }

    #[test]
    fn test_import_requires_manager() {
        let (temp, storage, settings) = setup();
        let session = Session::viewer();
        let service = ImportService::new(&storage, &settings, &session);

        let path = temp.path().join("in.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        assert!(service.import_file(&path).unwrap_err().is_permission_denied());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_alternate_date_formats() {
        let (_temp, storage, settings) = setup();
        let session = Session::manager();
        let service = ImportService::new(&storage, &settings, &session);

        let data = "Date,Description,Category,Amount,Paid By\n15/02/2025,Wifi,Internet,999,Amith\n16 Feb 2025,Power,Electricity,1200,Anusha\n";
        let parsed = service.parse_csv(data.as_bytes()).unwrap();
        let dates: Vec<_> = parsed.iter().map(|r| r.as_ref().unwrap().date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 16).unwrap(),
            ]
        );
    }
}
