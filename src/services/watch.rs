//! Snapshot watching
//!
//! Another process (or another terminal) may rewrite `expenses.json` at any
//! time. The watcher polls the file's fingerprint and, inside one process,
//! also listens to the repository's change events. Either source yields a
//! [`SnapshotChanged`] and the caller recomputes from a fresh snapshot.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::error::HouseshareResult;
use crate::storage::{fingerprint, ChangeEvent, Fingerprint};

/// Default polling interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Where a change was noticed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// The file on disk changed
    File,
    /// A save in this process
    Event(ChangeEvent),
}

/// The expense snapshot is out of date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotChanged {
    /// Counts changes seen by this watcher, starting at 1
    pub sequence: u64,
    pub source: ChangeSource,
}

/// Polls for changes to the expense snapshot
pub struct SnapshotWatcher {
    path: PathBuf,
    interval: Duration,
    last: Fingerprint,
    events: Option<Receiver<ChangeEvent>>,
    sequence: u64,
}

impl SnapshotWatcher {
    /// Watch `path`, treating its current state as already seen
    pub fn new(path: PathBuf, interval: Duration) -> Self {
        let last = fingerprint(&path);
        Self {
            path,
            interval,
            last,
            events: None,
            sequence: 0,
        }
    }

    /// Also report in-process saves from a repository subscription
    pub fn with_events(mut self, events: Receiver<ChangeEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Check once without blocking
    pub fn poll(&mut self) -> Option<SnapshotChanged> {
        let mut source = None;

        if let Some(events) = &self.events {
            // Drain so several saves collapse into one notification
            loop {
                match events.try_recv() {
                    Ok(event) => source = Some(ChangeSource::Event(event)),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.events = None;
                        break;
                    }
                }
            }
        }

        let current = fingerprint(&self.path);
        if current != self.last {
            self.last = current;
            source = source.or(Some(ChangeSource::File));
        }

        source.map(|source| {
            self.sequence += 1;
            tracing::debug!(sequence = self.sequence, ?source, "snapshot changed");
            SnapshotChanged {
                sequence: self.sequence,
                source,
            }
        })
    }

    /// Poll every interval and call `on_change` for each change.
    ///
    /// Stops after `max_changes` changes if given, otherwise runs until
    /// `on_change` returns an error.
    pub fn run<F>(&mut self, max_changes: Option<u64>, mut on_change: F) -> HouseshareResult<()>
    where
        F: FnMut(SnapshotChanged) -> HouseshareResult<()>,
    {
        let mut handled = 0;
        while max_changes.map_or(true, |max| handled < max) {
            thread::sleep(self.interval);
            if let Some(change) = self.poll() {
                on_change(change)?;
                handled += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};
    use crate::storage::{ChangeKind, ExpenseRepository};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn expense() -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "Rent",
            "Rent",
            Money::from_units(1000),
            "Amith",
        )
    }

    #[test]
    fn test_file_changes_detected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let mut watcher = SnapshotWatcher::new(path.clone(), Duration::from_millis(1));

        assert!(watcher.poll().is_none());

        std::fs::write(&path, "{\"expenses\": []}").unwrap();
        let change = watcher.poll().unwrap();
        assert_eq!(change.sequence, 1);
        assert_eq!(change.source, ChangeSource::File);

        // Already seen
        assert!(watcher.poll().is_none());

        std::fs::remove_file(&path).unwrap();
        assert_eq!(watcher.poll().unwrap().sequence, 2);
    }

    #[test]
    fn test_repository_events_collapse() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path.clone());
        let mut watcher = SnapshotWatcher::new(path, Duration::from_millis(1))
            .with_events(repo.subscribe().unwrap());

        repo.upsert(expense()).unwrap();
        repo.save().unwrap();
        repo.upsert(expense()).unwrap();
        repo.save().unwrap();

        let change = watcher.poll().unwrap();
        match change.source {
            ChangeSource::Event(event) => {
                assert_eq!(event.revision, 2);
                assert_eq!(event.kind, ChangeKind::Created);
            }
            ChangeSource::File => panic!("expected a repository event"),
        }
        assert!(watcher.poll().is_none());
    }

    #[test]
    fn test_run_stops_after_max_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path.clone());
        let mut watcher = SnapshotWatcher::new(path, Duration::from_millis(1))
            .with_events(repo.subscribe().unwrap());

        repo.upsert(expense()).unwrap();
        repo.save().unwrap();

        let mut seen = Vec::new();
        watcher
            .run(Some(1), |change| {
                seen.push(change.sequence);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![1]);
    }
}
