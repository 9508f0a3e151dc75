//! Charts report
//!
//! Where the money went: spending by category, each roommate's share of the
//! total, and a month-by-month breakdown per roommate.

use std::io::Write;

use serde::Serialize;

use crate::config::settings::Settings;
use crate::display::report::{format_bar, format_percentage, separator, truncate, MoneyFormat};
use crate::engine::{monthly_matrix, totals_by_category, totals_by_person, MonthlyRow};
use crate::error::HouseshareResult;
use crate::models::{Expense, Money};

const BAR_WIDTH: usize = 24;

/// A named total with its share of the overall total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub name: String,
    pub value: Money,
    /// 0.0 to 100.0
    pub percentage: f64,
}

/// Chart data for one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ChartsReport {
    pub total: Money,
    /// Configured categories with spending, in configured order
    pub by_category: Vec<Share>,
    /// Every roommate, in roster order
    pub by_person: Vec<Share>,
    /// Latest months, oldest first
    pub monthly: Vec<MonthlyRow>,
    pub roommates: Vec<String>,
    #[serde(skip)]
    format: MoneyFormat,
}

impl ChartsReport {
    /// Generate chart data from an (already filtered) expense snapshot
    pub fn generate(expenses: &[Expense], settings: &Settings) -> Self {
        let total: Money = expenses.iter().map(|e| e.amount).sum();
        let share = |name: &str, value: Money| Share {
            name: name.to_string(),
            value,
            percentage: value.percentage_of(total),
        };

        Self {
            total,
            by_category: totals_by_category(expenses, &settings.categories)
                .iter()
                .map(|c| share(&c.name, c.value))
                .collect(),
            by_person: totals_by_person(expenses, &settings.roommates)
                .iter()
                .map(|p| share(&p.name, p.value))
                .collect(),
            monthly: monthly_matrix(expenses, &settings.roommates, settings.month_window),
            roommates: settings.roommates.clone(),
            format: MoneyFormat::new(settings.currency_symbol.as_str(), settings.number_grouping),
        }
    }

    /// Category breakdown with bars
    pub fn format_categories(&self) -> String {
        let mut output = String::from("Spending by Category\n");
        output.push_str(&separator(72));
        output.push('\n');

        if self.by_category.is_empty() {
            output.push_str("No data available\n");
            return output;
        }
        output.push_str(&self.format_shares(&self.by_category));
        output
    }

    /// Per-roommate contribution with bars
    pub fn format_people(&self) -> String {
        let mut output = String::from("Person Contribution\n");
        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&self.format_shares(&self.by_person));
        output
    }

    /// Month-by-month table, one column per roommate
    pub fn format_monthly(&self) -> String {
        let mut output = String::from("Monthly Breakdown\n");
        let width = 10 + 16 * (self.roommates.len() + 1);
        output.push_str(&separator(width));
        output.push('\n');

        if self.monthly.is_empty() {
            output.push_str("No data available\n");
            return output;
        }

        output.push_str(&format!("{:<10}", "Month"));
        for person in &self.roommates {
            output.push_str(&format!("{:>16}", truncate(person, 15)));
        }
        output.push_str(&format!("{:>16}\n", "Total"));

        for row in &self.monthly {
            output.push_str(&format!("{:<10}", row.month.to_string()));
            for person in &self.roommates {
                output.push_str(&format!("{:>16}", self.format.format(row.get(person))));
            }
            output.push_str(&format!("{:>16}\n", self.format.format(row.total())));
        }
        output
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.format_categories(),
            self.format_people(),
            self.format_monthly()
        )
    }

    /// Export the monthly matrix as CSV (`Month, <roommates...>, Total`)
    pub fn export_csv<W: Write>(&self, writer: W) -> HouseshareResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec!["Month".to_string()];
        header.extend(self.roommates.iter().cloned());
        header.push("Total".to_string());
        csv.write_record(&header)?;

        for row in &self.monthly {
            let mut record = vec![row.month.to_string()];
            record.extend(self.roommates.iter().map(|p| row.get(p).to_string()));
            record.push(row.total().to_string());
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }

    fn format_shares(&self, shares: &[Share]) -> String {
        let max = shares
            .iter()
            .map(|s| s.value.cents())
            .max()
            .unwrap_or(0) as f64;

        shares
            .iter()
            .map(|s| {
                format!(
                    "{:<14} {} {:>16} {:>6}\n",
                    truncate(&s.name, 14),
                    format_bar(s.value.cents() as f64, max, BAR_WIDTH),
                    self.format.format(s.value),
                    format_percentage(s.percentage)
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(month: u32, category: &str, units: i64, paid_by: &str) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, month, 1).unwrap(),
            "item",
            category,
            Money::from_units(units),
            paid_by,
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, "Rent", 600, "Amith"),
            expense(2, "Food", 300, "Anusha"),
            expense(2, "Internet", 100, "Amith"),
        ]
    }

    #[test]
    fn test_shares() {
        let report = ChartsReport::generate(&sample(), &Settings::default());

        assert_eq!(report.total, Money::from_units(1000));
        let names: Vec<_> = report.by_category.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Internet"]);
        assert!((report.by_category[0].percentage - 60.0).abs() < 1e-9);

        assert_eq!(report.by_person.len(), 2);
        assert!((report.by_person[0].percentage - 70.0).abs() < 1e-9);
        assert_eq!(report.monthly.len(), 2);
    }

    #[test]
    fn test_empty_snapshot() {
        let report = ChartsReport::generate(&[], &Settings::default());

        assert!(report.by_category.is_empty());
        assert!(report.by_person.iter().all(|s| s.percentage == 0.0));
        assert!(report.format_categories().contains("No data available"));
        assert!(report.format_monthly().contains("No data available"));
    }

    #[test]
    fn test_format_terminal() {
        let output = ChartsReport::generate(&sample(), &Settings::default()).format_terminal();

        assert!(output.contains("Spending by Category"));
        assert!(output.contains("Person Contribution"));
        assert!(output.contains("Jan 2025"));
        assert!(output.contains("₹600.00"));
        assert!(output.contains("60%"));
    }

    #[test]
    fn test_export_monthly_csv() {
        let report = ChartsReport::generate(&sample(), &Settings::default());
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "Month,Amith,Anusha,Total\nJan 2025,600.00,0.00,600.00\nFeb 2025,100.00,300.00,400.00\n"
        );
    }
}
