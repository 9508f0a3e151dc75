//! Expense filtering
//!
//! Filters are applied to a snapshot before any aggregation runs, so every
//! total, matrix and settlement reflects exactly the expenses on screen.

use crate::models::{Expense, MonthLabel};

/// Predicates narrowing an expense snapshot. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Only expenses in this month
    pub month: Option<MonthLabel>,
    /// Only expenses in this category
    pub category: Option<String>,
    /// Only expenses paid by this roommate
    pub paid_by: Option<String>,
    /// Case-insensitive text matched against description, category and payer
    pub search: Option<String>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by month
    pub fn month(mut self, month: MonthLabel) -> Self {
        self.month = Some(month);
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by payer
    pub fn paid_by(mut self, person: impl Into<String>) -> Self {
        self.paid_by = Some(person.into());
        self
    }

    /// Filter by free-text search
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// True when no predicate is set
    pub fn is_empty(&self) -> bool {
        self.month.is_none()
            && self.category.is_none()
            && self.paid_by.is_none()
            && self.search.is_none()
    }

    /// Check a single expense against every set predicate
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(month) = self.month {
            if expense.month != month {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &expense.category != category {
                return false;
            }
        }
        if let Some(person) = &self.paid_by {
            if &expense.paid_by != person {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = expense.description.to_lowercase().contains(&needle)
                || expense.category.to_lowercase().contains(&needle)
                || expense.paid_by.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }

    /// Produce the filtered snapshot, preserving input order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}
