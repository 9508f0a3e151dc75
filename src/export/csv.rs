//! CSV export of the expense list
//!
//! Columns: `Date, Description, Category, Amount, Paid By, Month`. The same
//! layout is accepted by the CSV import.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::HouseshareResult;
use crate::models::Expense;

/// Header row written by [`export_expenses_csv`]
pub const EXPENSE_CSV_HEADERS: [&str; 6] =
    ["Date", "Description", "Category", "Amount", "Paid By", "Month"];

/// Default file name for an export made on `today`
pub fn default_filename(today: NaiveDate) -> String {
    format!("expenses-{}.csv", today.format("%Y-%m-%d"))
}

/// Write one row per expense, in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> HouseshareResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPENSE_CSV_HEADERS)?;

    for expense in expenses {
        let date = expense.date.format("%Y-%m-%d").to_string();
        let amount = expense.amount.to_string();
        let month = expense.month.to_string();
        csv.write_record([
            date.as_str(),
            expense.description.as_str(),
            expense.category.as_str(),
            amount.as_str(),
            expense.paid_by.as_str(),
            month.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_default_filename() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(default_filename(today), "expenses-2025-03-07.csv");
    }

    #[test]
    fn test_export_layout_and_quoting() {
        let expenses = vec![
            Expense::new(
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
                "Rice, dal",
                "Groceries",
                Money::from_cents(125_050),
                "Anusha",
            ),
            Expense::new(
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                "Rent",
                "Rent",
                Money::from_units(15000),
                "Amith",
            ),
        ];

        let mut buffer = Vec::new();
        export_expenses_csv(&expenses, &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Date,Description,Category,Amount,Paid By,Month\n\
             2025-01-05,\"Rice, dal\",Groceries,1250.50,Anusha,Jan 2025\n\
             2025-02-01,Rent,Rent,15000.00,Amith,Feb 2025\n"
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut buffer = Vec::new();
        export_expenses_csv(&[], &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Date,Description,Category,Amount,Paid By,Month\n"
        );
    }
}
