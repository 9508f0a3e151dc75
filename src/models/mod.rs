//! Core data models for houseshare
//!
//! This module contains the data structures that represent the household
//! domain: expenses, money, month labels and the caller's session.

pub mod expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod session;

pub use expense::{Expense, ExpenseValidationError, MAX_AMOUNT};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError, NumberGrouping};
pub use month::{MonthLabel, MonthParseError};
pub use session::{Role, Session};
