//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, and tells
//! subscribers whenever a new snapshot has been written.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::HouseshareError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// What happened to the snapshot since the previous save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    /// Several kinds of change, or a save with nothing recorded
    Batch,
}

impl ChangeKind {
    fn merge(self, other: ChangeKind) -> ChangeKind {
        if self == other {
            self
        } else {
            ChangeKind::Batch
        }
    }
}

/// Published after every successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Monotonic per repository, starting at 1
    pub revision: u64,
}

/// Repository for expense persistence with a per-payer index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: paid_by -> expense_ids
    by_payer: RwLock<HashMap<String, Vec<ExpenseId>>>,
    revision: AtomicU64,
    pending: Mutex<Option<ChangeKind>>,
    subscribers: Mutex<Vec<Sender<ChangeEvent>>>,
}

fn lock_err(e: impl std::fmt::Display) -> HouseshareError {
    HouseshareError::Storage(format!("Failed to acquire lock: {}", e))
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_payer: RwLock::new(HashMap::new()),
            revision: AtomicU64::new(0),
            pending: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Load expenses from disk and build the index
    pub fn load(&self) -> Result<(), HouseshareError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_payer = self.by_payer.write().map_err(lock_err)?;

        data.clear();
        by_payer.clear();

        for expense in file_data.expenses {
            by_payer
                .entry(expense.paid_by.clone())
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        tracing::debug!(path = %self.path.display(), count = data.len(), "loaded expenses");
        Ok(())
    }

    /// Save expenses to disk and notify subscribers
    pub fn save(&self) -> Result<(), HouseshareError> {
        {
            let data = self.data.read().map_err(lock_err)?;
            let file_data = ExpenseData {
                expenses: sorted(data.values().cloned().collect()),
            };
            write_json_atomic(&self.path, &file_data)?;
        }

        let kind = self
            .pending
            .lock()
            .map_err(lock_err)?
            .take()
            .unwrap_or(ChangeKind::Batch);
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let event = ChangeEvent { kind, revision };

        tracing::debug!(?kind, revision, "saved expenses");
        self.publish(event)
    }

    /// Receive a [`ChangeEvent`] after every subsequent save
    pub fn subscribe(&self) -> Result<Receiver<ChangeEvent>, HouseshareError> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.lock().map_err(lock_err)?.push(tx);
        Ok(rx)
    }

    /// Number of saves so far
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    fn publish(&self, event: ChangeEvent) -> Result<(), HouseshareError> {
        let mut subscribers = self.subscribers.lock().map_err(lock_err)?;
        // Dropped receivers are forgotten
        subscribers.retain(|tx| tx.send(event).is_ok());
        Ok(())
    }

    fn record(&self, kind: ChangeKind) -> Result<(), HouseshareError> {
        let mut pending = self.pending.lock().map_err(lock_err)?;
        *pending = Some(match *pending {
            Some(existing) => existing.merge(kind),
            None => kind,
        });
        Ok(())
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, HouseshareError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, HouseshareError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(sorted(data.values().cloned().collect()))
    }

    /// Get expenses fronted by one roommate, newest first
    pub fn get_by_payer(&self, paid_by: &str) -> Result<Vec<Expense>, HouseshareError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_payer = self.by_payer.read().map_err(lock_err)?;

        let expenses = by_payer
            .get(paid_by)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        Ok(sorted(expenses))
    }

    /// Expenses whose displayed ID starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Expense>, HouseshareError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(sorted(
            data.values()
                .filter(|e| e.id.matches_prefix(prefix))
                .cloned()
                .collect(),
        ))
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), HouseshareError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_payer = self.by_payer.write().map_err(lock_err)?;

        let kind = if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_payer.get_mut(&old.paid_by) {
                ids.retain(|&id| id != expense.id);
            }
            ChangeKind::Updated
        } else {
            ChangeKind::Created
        };

        by_payer
            .entry(expense.paid_by.clone())
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense);

        drop(by_payer);
        drop(data);
        self.record(kind)
    }

    /// Delete an expense, returning whether it existed
    pub fn delete(&self, id: ExpenseId) -> Result<bool, HouseshareError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_payer = self.by_payer.write().map_err(lock_err)?;

        let Some(expense) = data.remove(&id) else {
            return Ok(false);
        };
        if let Some(ids) = by_payer.get_mut(&expense.paid_by) {
            ids.retain(|&eid| eid != id);
        }

        drop(by_payer);
        drop(data);
        self.record(ChangeKind::Deleted)?;
        Ok(true)
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, HouseshareError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}

fn sorted(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.created_at.cmp(&a.created_at))
    });
    expenses
}
