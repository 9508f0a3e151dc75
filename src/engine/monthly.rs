//! Month-by-person spending matrix

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::totals::PersonTotal;
use crate::models::{Expense, Money, MonthLabel};

/// Number of months kept in the matrix unless configured otherwise
pub const DEFAULT_MONTH_WINDOW: usize = 6;

/// Spending per roommate within one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub month: MonthLabel,
    /// One entry per roster member, in roster order
    pub totals: Vec<PersonTotal>,
}

impl MonthlyRow {
    /// Amount a roommate paid in this month (zero if not on the roster)
    pub fn get(&self, person: &str) -> Money {
        self.totals
            .iter()
            .find(|t| t.name == person)
            .map(|t| t.value)
            .unwrap_or_default()
    }

    /// Sum across all roommates
    pub fn total(&self) -> Money {
        self.totals.iter().map(|t| t.value).sum()
    }
}

/// Distinct months present in the expenses, oldest first
pub fn distinct_months(expenses: &[Expense]) -> Vec<MonthLabel> {
    expenses
        .iter()
        .map(|e| e.month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build the matrix over the `window` most recent months, oldest first.
pub fn monthly_matrix(expenses: &[Expense], roster: &[String], window: usize) -> Vec<MonthlyRow> {
    let months = distinct_months(expenses);
    let skip = months.len().saturating_sub(window);

    months
        .into_iter()
        .skip(skip)
        .map(|month| MonthlyRow {
            month,
            totals: roster
                .iter()
                .map(|person| PersonTotal {
                    name: person.clone(),
                    value: expenses
                        .iter()
                        .filter(|e| e.month == month && &e.paid_by == person)
                        .map(|e| e.amount)
                        .sum(),
                })
                .collect(),
        })
        .collect()
}
