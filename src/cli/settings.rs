//! Settings CLI commands
//!
//! Roster, categories and display preferences.

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::format_settings;
use crate::error::HouseshareResult;
use crate::models::{NumberGrouping, Session};
use crate::services::SettingsService;
use crate::storage::Storage;

use super::expense::parse_amount;

/// Digit grouping choices
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupingArg {
    /// 1,00,000
    Indian,
    /// 100,000
    Western,
}

impl From<GroupingArg> for NumberGrouping {
    fn from(arg: GroupingArg) -> Self {
        match arg {
            GroupingArg::Indian => NumberGrouping::Indian,
            GroupingArg::Western => NumberGrouping::Western,
        }
    }
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Add a roommate to the household
    AddRoommate {
        /// Roommate name
        name: String,
    },
    /// Remove a roommate from the household
    RemoveRoommate {
        /// Roommate name
        name: String,
    },
    /// Add an expense category
    AddCategory {
        /// Category name
        name: String,
    },
    /// Remove an expense category
    RemoveCategory {
        /// Category name
        name: String,
    },
    /// Set the currency symbol
    Currency {
        /// Symbol, e.g. "₹" or "$"
        symbol: String,
    },
    /// Set the large-expense threshold
    Threshold {
        /// Amount (e.g., "5000")
        amount: String,
    },
    /// Set how many months the monthly breakdown shows
    Window {
        /// Number of months
        months: usize,
    },
    /// Set digit grouping for amounts
    Grouping {
        #[arg(value_enum)]
        style: GroupingArg,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    storage: &Storage,
    settings: &mut Settings,
    session: &Session,
    cmd: SettingsCommands,
) -> HouseshareResult<()> {
    let service = SettingsService::new(storage, session);

    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(settings));
        }
        SettingsCommands::AddRoommate { name } => {
            let name = service.add_roommate(settings, &name)?;
            println!("Added roommate: {}", name);
        }
        SettingsCommands::RemoveRoommate { name } => {
            service.remove_roommate(settings, &name)?;
            println!("Removed roommate: {}", name.trim());
        }
        SettingsCommands::AddCategory { name } => {
            let name = service.add_category(settings, &name)?;
            println!("Added category: {}", name);
        }
        SettingsCommands::RemoveCategory { name } => {
            service.remove_category(settings, &name)?;
            println!("Removed category: {}", name.trim());
        }
        SettingsCommands::Currency { symbol } => {
            service.set_currency(settings, &symbol)?;
            println!("Currency set to {}", settings.currency_symbol);
        }
        SettingsCommands::Threshold { amount } => {
            service.set_threshold(settings, parse_amount(&amount)?)?;
            println!(
                "Large-expense threshold set to {}",
                settings.format_money(settings.large_expense_threshold)
            );
        }
        SettingsCommands::Window { months } => {
            service.set_month_window(settings, months)?;
            println!("Monthly breakdown shows the latest {} month(s)", months);
        }
        SettingsCommands::Grouping { style } => {
            service.set_number_grouping(settings, style.into())?;
            println!("Number grouping set to {:?}", settings.number_grouping);
        }
    }

    Ok(())
}
