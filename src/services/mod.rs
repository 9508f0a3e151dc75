//! Service layer for houseshare
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, role checks, audit logging, import, and change watching.

pub mod expense;
pub mod import;
pub mod settings;
pub mod watch;

pub use expense::{CreateExpenseInput, ExpenseService, UpdateExpenseInput};
pub use import::{ImportResult, ImportService, ImportStatus};
pub use settings::SettingsService;
pub use watch::{ChangeSource, SnapshotChanged, SnapshotWatcher, DEFAULT_POLL_INTERVAL};
