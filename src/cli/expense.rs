//! Expense CLI commands
//!
//! Implements CLI commands for expense management.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::engine::ExpenseFilter;
use crate::error::{HouseshareError, HouseshareResult};
use crate::models::{Money, MonthLabel, Session};
use crate::services::{
    CreateExpenseInput, ExpenseService, ImportService, ImportStatus, UpdateExpenseInput,
};
use crate::storage::Storage;

/// Filters shared by listing, reporting and export commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only this month ("Jan 2025" or "2025-01")
    #[arg(short, long)]
    pub month: Option<String>,
    /// Only this category
    #[arg(short = 'C', long)]
    pub category: Option<String>,
    /// Only expenses paid by this roommate
    #[arg(short, long)]
    pub paid_by: Option<String>,
    /// Case-insensitive text search in description, category and payer
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Build the engine filter
    pub fn to_filter(&self) -> HouseshareResult<ExpenseFilter> {
        let mut filter = ExpenseFilter::new();
        if let Some(month) = &self.month {
            filter = filter.month(parse_month(month)?);
        }
        if let Some(category) = &self.category {
            filter = filter.category(category.as_str());
        }
        if let Some(person) = &self.paid_by {
            filter = filter.paid_by(person.as_str());
        }
        if let Some(text) = &self.search {
            filter = filter.search(text.as_str());
        }
        Ok(filter)
    }
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "1500" or "1500.50")
        amount: String,
        /// Roommate who paid
        #[arg(short, long)]
        paid_by: String,
        /// Category name
        #[arg(short, long, default_value = "Others")]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List expenses, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details and history
    Show {
        /// Expense ID (full or short, e.g. "exp-1a2b")
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New payer
        #[arg(short, long)]
        paid_by: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
    /// Import expenses from CSV
    Import {
        /// Path to CSV file (Date, Description, Category, Amount, Paid By)
        file: PathBuf,
        /// Show what would be imported without saving
        #[arg(long)]
        dry_run: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: ExpenseCommands,
) -> HouseshareResult<()> {
    let service = ExpenseService::new(storage, settings, session);

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            paid_by,
            category,
            date,
        } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => chrono::Local::now().date_naive(),
            };

            let expense = service.create(CreateExpenseInput {
                date,
                description,
                category,
                amount: parse_amount(&amount)?,
                paid_by,
            })?;

            println!("Added expense:");
            println!("  ID:       {}", expense.id);
            println!("  Date:     {}", expense.date.format(&settings.date_format));
            println!("  Amount:   {}", settings.format_money(expense.amount));
            println!("  Paid by:  {}", expense.paid_by);
            println!("  Category: {}", expense.category);
            if expense.is_large(settings.large_expense_threshold) {
                println!("  Note:     large expense");
            }
        }

        ExpenseCommands::List { filter, limit } => {
            let mut expenses = service.list(&filter.to_filter()?)?;
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }
            print!("{}", format_expense_table(&expenses, settings));
        }

        ExpenseCommands::Show { id } => {
            let expense = service.require(&id)?;
            let history = service.history(expense.id)?;
            print!("{}", format_expense_details(&expense, settings, &history));
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            paid_by,
            category,
            date,
        } => {
            let input = UpdateExpenseInput {
                date: date.as_deref().map(parse_date).transpose()?,
                description,
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                paid_by,
            };
            if input.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let expense = service.require(&id)?;
            let expense = service.update(expense.id, input)?;
            println!("Updated expense {}", expense.id);
            print!("{}", format_expense_details(&expense, settings, &[]));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.require(&id)?;
            let expense = service.delete(expense.id)?;
            println!(
                "Deleted expense {} ({}, {})",
                expense.id,
                expense.description,
                settings.format_money(expense.amount)
            );
        }

        ExpenseCommands::Import { file, dry_run } => {
            let importer = ImportService::new(storage, settings, session);

            if dry_run {
                let source = std::fs::File::open(&file).map_err(|e| {
                    HouseshareError::Import(format!("Failed to open {}: {}", file.display(), e))
                })?;
                let preview = importer.preview(&importer.parse_csv(source)?)?;

                let mut new = 0;
                let mut duplicates = 0;
                for entry in &preview {
                    match &entry.status {
                        ImportStatus::New => new += 1,
                        ImportStatus::Duplicate => duplicates += 1,
                        ImportStatus::Error(message) => {
                            println!("  Row {}: {}", entry.row_number, message)
                        }
                    }
                }
                println!(
                    "Dry run: {} new, {} duplicate(s), {} error(s)",
                    new,
                    duplicates,
                    preview.len() - new - duplicates
                );
                return Ok(());
            }

            let result = importer.import_file(&file)?;
            for (row, message) in &result.error_messages {
                println!("  Row {}: {}", row, message);
            }
            println!(
                "Imported {} expense(s), skipped {} duplicate(s), {} error(s)",
                result.imported, result.duplicates_skipped, result.errors
            );
        }
    }

    Ok(())
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> HouseshareResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        HouseshareError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse an amount argument
pub fn parse_amount(s: &str) -> HouseshareResult<Money> {
    Money::parse(s).map_err(|e| {
        HouseshareError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '1500' or '1500.50'. Error: {}",
            s, e
        ))
    })
}

/// Parse a month argument
pub fn parse_month(s: &str) -> HouseshareResult<MonthLabel> {
    MonthLabel::parse(s).map_err(|_| {
        HouseshareError::Validation(format!(
            "Invalid month: '{}'. Use 'Jan 2025' or '2025-01'",
            s
        ))
    })
}
