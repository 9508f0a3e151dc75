//! Aggregation & settlement engine
//!
//! Pure functions over an expense snapshot and the household roster. Nothing
//! here performs I/O or holds state: every call takes an immutable snapshot
//! and returns freshly derived values, so recomputing after a change is just
//! calling again.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use houseshare::engine::compute_settlement;
//! use houseshare::models::{Expense, Money};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let expenses = vec![Expense::new(date, "Rent", "Rent", Money::from_units(1000), "A")];
//! let roster = vec!["A".to_string(), "B".to_string()];
//!
//! let transfers = compute_settlement(&expenses, &roster);
//! assert_eq!(transfers[0].from, "B");
//! assert_eq!(transfers[0].amount, Money::from_units(500));
//! ```

pub mod filter;
pub mod monthly;
pub mod settlement;
pub mod totals;

pub use filter::ExpenseFilter;
pub use monthly::{distinct_months, monthly_matrix, MonthlyRow, DEFAULT_MONTH_WINDOW};
pub use settlement::{
    balances_from_totals, compute_balances, compute_settlement, settle_balances,
    settlement_plan, Balance, SettlementPlan, Transfer,
};
pub use totals::{total_spent, totals_by_category, totals_by_person, CategoryTotal, PersonTotal};

use serde::{Deserialize, Serialize};

use crate::models::{Expense, Money};

/// Every derived view of one filtered snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Number of expenses that passed the filter
    pub expense_count: usize,
    pub total_spent: Money,
    pub by_category: Vec<CategoryTotal>,
    pub by_person: Vec<PersonTotal>,
    pub monthly: Vec<MonthlyRow>,
    pub settlement: SettlementPlan,
}

/// Apply `filter` and run every rollup over what remains
pub fn aggregate(
    expenses: &[Expense],
    roster: &[String],
    categories: &[String],
    filter: &ExpenseFilter,
    month_window: usize,
) -> Aggregates {
    let snapshot = filter.apply(expenses);

    Aggregates {
        expense_count: snapshot.len(),
        total_spent: total_spent(&snapshot),
        by_category: totals_by_category(&snapshot, categories),
        by_person: totals_by_person(&snapshot, roster),
        monthly: monthly_matrix(&snapshot, roster, month_window),
        settlement: settlement_plan(&snapshot, roster),
    }
}
