//! Expense display formatting
//!
//! Table and detail views for expenses, and the settings overview.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::audit::AuditEntry;
use crate::config::settings::Settings;
use crate::models::Expense;

use super::report::truncate;

/// Marker shown next to expenses at or above the large-expense threshold
pub const LARGE_MARKER: &str = "▲";

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid By")]
    paid_by: String,
    #[tabled(rename = "")]
    flag: &'static str,
}

impl ExpenseRow {
    fn new(expense: &Expense, settings: &Settings) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.format(&settings.date_format).to_string(),
            description: truncate(&expense.description, 32),
            category: expense.category.clone(),
            amount: settings.format_money(expense.amount),
            paid_by: expense.paid_by.clone(),
            flag: if expense.is_large(settings.large_expense_threshold) {
                LARGE_MARKER
            } else {
                ""
            },
        }
    }
}

/// Format expenses as a table, with a footer for the total
pub fn format_expense_table(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows: Vec<_> = expenses.iter().map(|e| ExpenseRow::new(e, settings)).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    let total = expenses.iter().map(|e| e.amount).sum();
    let large = expenses
        .iter()
        .filter(|e| e.is_large(settings.large_expense_threshold))
        .count();

    let mut output = format!("{}\n", table);
    output.push_str(&format!(
        "{} expense(s), total {}\n",
        expenses.len(),
        settings.format_money(total)
    ));
    if large > 0 {
        output.push_str(&format!(
            "{} {} at or above {}\n",
            LARGE_MARKER,
            large,
            settings.format_money(settings.large_expense_threshold)
        ));
    }
    output
}

/// Format one expense with its audit history
pub fn format_expense_details(expense: &Expense, settings: &Settings, history: &[AuditEntry]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format(&settings.date_format)));
    output.push_str(&format!("Month:       {}\n", expense.month));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Amount:      {}", settings.format_money(expense.amount)));
    if expense.is_large(settings.large_expense_threshold) {
        output.push_str(&format!(" {} large", LARGE_MARKER));
    }
    output.push('\n');
    output.push_str(&format!("Paid by:     {}\n", expense.paid_by));
    output.push_str(&format!(
        "Created:     {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    if !history.is_empty() {
        output.push_str("\nHistory:\n");
        for entry in history {
            output.push_str(&format!("  {}\n", entry));
        }
    }

    output
}

/// Format the household settings
pub fn format_settings(settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Roommates:       {}\n", settings.roommates.join(", ")));
    output.push_str(&format!("Categories:      {}\n", settings.categories.join(", ")));
    output.push_str(&format!("Currency:        {}\n", settings.currency_symbol));
    output.push_str(&format!(
        "Large expense:   {}\n",
        settings.format_money(settings.large_expense_threshold)
    ));
    output.push_str(&format!("Month window:    {}\n", settings.month_window));
    output.push_str(&format!("Number grouping: {:?}\n", settings.number_grouping));

    output
}
