//! Expense model
//!
//! A single household expense: who paid, how much, for what, and when.
//! The month label is derived from the date and refreshed whenever the
//! date changes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;
use super::month::MonthLabel;

/// Largest amount a single expense may carry (one hundred crore).
///
/// Keeps every rollup over a realistic store far inside `i64` cents.
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000);

/// A shared household expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Date the expense was incurred
    pub date: NaiveDate,

    /// What the money was spent on
    pub description: String,

    /// Category name (expected to be one of the configured categories)
    pub category: String,

    /// Amount paid (always positive for a valid expense)
    pub amount: Money,

    /// Roommate who fronted the payment
    pub paid_by: String,

    /// Month label derived from `date`
    pub month: MonthLabel,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        paid_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            date,
            description: description.into(),
            category: category.into(),
            amount,
            paid_by: paid_by.into(),
            month: MonthLabel::from_date(date),
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the date, keeping the month label in step
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.month = MonthLabel::from_date(date);
    }

    /// Whether this expense should be highlighted as large
    pub fn is_large(&self, threshold: Money) -> bool {
        threshold.is_positive() && self.amount >= threshold
    }

    /// Key used to recognise the same expense arriving twice through import
    pub fn duplicate_key(&self) -> (NaiveDate, String, Money, String) {
        (
            self.date,
            self.description.trim().to_lowercase(),
            self.amount,
            self.paid_by.clone(),
        )
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.paid_by.trim().is_empty() {
            return Err(ExpenseValidationError::MissingPayer);
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }

        if self.month != MonthLabel::from_date(self.date) {
            return Err(ExpenseValidationError::MonthMismatch {
                date: self.date,
                month: self.month,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}, paid by {})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.category,
            self.paid_by
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    MissingPayer,
    MissingCategory,
    MonthMismatch { date: NaiveDate, month: MonthLabel },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} is above the limit of {}", amount, MAX_AMOUNT)
            }
            Self::MissingPayer => write!(f, "Expense must name who paid"),
            Self::MissingCategory => write!(f, "Expense must have a category"),
            Self::MonthMismatch { date, month } => {
                write!(f, "Month label {} does not match date {}", month, date)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
