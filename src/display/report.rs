//! Report formatting utilities for terminal output

use crate::models::{Money, NumberGrouping};

/// How amounts are rendered in one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub symbol: String,
    pub grouping: NumberGrouping,
}

impl MoneyFormat {
    pub fn new(symbol: impl Into<String>, grouping: NumberGrouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    /// "₹1,00,000.00"
    pub fn format(&self, amount: Money) -> String {
        amount.format_grouped(&self.symbol, self.grouping)
    }

    /// Balance with an explicit sign: "+₹500.00", "-₹500.00", "₹0.00"
    pub fn format_signed(&self, amount: Money) -> String {
        if amount.is_positive() {
            format!("+{}", self.format(amount))
        } else {
            self.format(amount)
        }
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new("₹", NumberGrouping::Indian)
    }
}

/// Wrap already formatted text in red/green by the sign of `amount`
pub fn colorize(text: &str, amount: Money) -> String {
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to at most `max_len` characters, ending with "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
