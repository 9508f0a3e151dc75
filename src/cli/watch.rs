//! Watch CLI command
//!
//! Prints the summary, then reprints it whenever the expense file changes.

use std::time::Duration;

use clap::Args;

use crate::config::settings::Settings;
use crate::error::HouseshareResult;
use crate::reports::SummaryReport;
use crate::services::{SnapshotWatcher, DEFAULT_POLL_INTERVAL};
use crate::storage::Storage;

use super::expense::parse_month;

/// Arguments for `watch`
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between checks
    #[arg(short, long, default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    pub interval: u64,
    /// Stop after this many changes
    #[arg(short, long)]
    pub count: Option<u64>,
    /// Only this month ("Jan 2025" or "2025-01")
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Handle the watch command
pub fn handle_watch_command(
    storage: &Storage,
    settings: &Settings,
    args: WatchArgs,
) -> HouseshareResult<()> {
    let month = args.month.as_deref().map(parse_month).transpose()?;
    let interval = Duration::from_secs(args.interval.max(1));
    let path = storage.paths().expenses_file();

    let print_summary = || -> HouseshareResult<()> {
        let expenses = storage.expenses.get_all()?;
        print!("{}", SummaryReport::generate(&expenses, settings, month).format_terminal());
        Ok(())
    };

    print_summary()?;
    println!("\nWatching {} (Ctrl-C to stop)", path.display());

    let mut watcher = SnapshotWatcher::new(path, interval);
    watcher.run(args.count, |change| {
        storage.expenses.load()?;
        println!("\n[change {}]", change.sequence);
        print_summary()
    })
}
