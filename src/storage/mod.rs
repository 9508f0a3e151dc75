//! Storage layer for houseshare
//!
//! Provides JSON file storage with atomic writes, change notification, and
//! an append-only audit trail for every mutation.

pub mod expenses;
pub mod file_io;
pub mod init;

pub use expenses::{ChangeEvent, ChangeKind, ExpenseRepository};
pub use file_io::{fingerprint, read_json, write_json_atomic, Fingerprint};
pub use init::{initialize_storage, needs_initialization};

use crate::audit::AuditLogger;
use crate::config::paths::HousesharePaths;
use crate::error::HouseshareResult;

/// Main storage coordinator
pub struct Storage {
    paths: HousesharePaths,
    pub expenses: ExpenseRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: HousesharePaths) -> HouseshareResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &HousesharePaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> HouseshareResult<()> {
        self.expenses.load()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
