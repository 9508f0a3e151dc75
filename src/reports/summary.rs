//! Summary report
//!
//! Total spent, what each roommate paid, the equal split, and who should pay
//! whom. Optionally narrowed to one month.

use std::io::Write;

use serde::Serialize;

use crate::config::settings::Settings;
use crate::display::report::{colorize, double_separator, separator, MoneyFormat};
use crate::engine::{settlement_plan, totals_by_person, ExpenseFilter, PersonTotal, SettlementPlan};
use crate::error::HouseshareResult;
use crate::models::{Expense, Money, MonthLabel};

/// Summary of one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Month the report is narrowed to, if any
    pub month: Option<MonthLabel>,
    pub expense_count: usize,
    pub total_spent: Money,
    pub by_person: Vec<PersonTotal>,
    pub settlement: SettlementPlan,
    /// Expenses at or above the large-expense threshold
    pub large_expenses: usize,
    #[serde(skip)]
    format: MoneyFormat,
}

impl SummaryReport {
    /// Generate the summary for all expenses or for one month
    pub fn generate(expenses: &[Expense], settings: &Settings, month: Option<MonthLabel>) -> Self {
        let mut filter = ExpenseFilter::new();
        if let Some(month) = month {
            filter = filter.month(month);
        }
        let snapshot = filter.apply(expenses);
        let settlement = settlement_plan(&snapshot, &settings.roommates);

        Self {
            month,
            expense_count: snapshot.len(),
            total_spent: snapshot.iter().map(|e| e.amount).sum(),
            by_person: totals_by_person(&snapshot, &settings.roommates),
            large_expenses: snapshot
                .iter()
                .filter(|e| e.is_large(settings.large_expense_threshold))
                .count(),
            settlement,
            format: MoneyFormat::new(settings.currency_symbol.as_str(), settings.number_grouping),
        }
    }

    /// "All time" or the month label
    pub fn subtitle(&self) -> String {
        self.month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "All time".to_string())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let fmt = &self.format;
        let mut output = String::new();

        output.push_str(&format!("Expense Summary: {}\n", self.subtitle()));
        output.push_str(&double_separator(52));
        output.push('\n');
        output.push_str(&format!("{:<24} {:>27}\n", "Total Spent", fmt.format(self.total_spent)));
        output.push_str(&format!("{:<24} {:>27}\n", "Expenses", self.expense_count));
        output.push_str(&format!(
            "{:<24} {:>27}\n",
            "Equal Split",
            fmt.format(self.settlement.equal_split)
        ));
        if self.large_expenses > 0 {
            output.push_str(&format!("{:<24} {:>27}\n", "Large Expenses", self.large_expenses));
        }

        output.push_str(&format!(
            "\n{:<16} {:>16} {:>18}\n",
            "Roommate", "Paid", "Balance"
        ));
        output.push_str(&separator(52));
        output.push('\n');
        for balance in &self.settlement.balances {
            let signed = format!("{:>18}", fmt.format_signed(balance.balance));
            output.push_str(&format!(
                "{:<16} {:>16} {}\n",
                balance.person,
                fmt.format(balance.paid),
                colorize(&signed, balance.balance)
            ));
        }

        output.push_str("\nSettlement\n");
        output.push_str(&separator(52));
        output.push('\n');
        output.push_str(&format_transfers(&self.settlement, fmt));

        output
    }

    /// Export balances and transfers as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> HouseshareResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Period", "Type", "Person", "To", "Amount"])?;

        let period = self.subtitle();
        let mut row = |kind: &str, person: &str, to: &str, amount: Money| {
            let amount = amount.to_string();
            csv.write_record([period.as_str(), kind, person, to, amount.as_str()])
        };

        row("Total", "", "", self.total_spent)?;
        row("Equal Split", "", "", self.settlement.equal_split)?;
        for balance in &self.settlement.balances {
            row("Paid", &balance.person, "", balance.paid)?;
            row("Balance", &balance.person, "", balance.balance)?;
        }
        for transfer in &self.settlement.transfers {
            row("Transfer", &transfer.from, &transfer.to, transfer.amount)?;
        }
        drop(row);

        csv.flush()?;
        Ok(())
    }
}

/// "B pays A ₹500.00" lines, or "All settled up!"
pub fn format_transfers(plan: &SettlementPlan, fmt: &MoneyFormat) -> String {
    if plan.is_settled() {
        return "All settled up!\n".to_string();
    }

    plan.transfers
        .iter()
        .map(|t| format!("{} pays {} {}\n", t.from, t.to, fmt.format(t.amount)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(month: u32, units: i64, paid_by: &str) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, month, 1).unwrap(),
            "Rent",
            "Rent",
            Money::from_units(units),
            paid_by,
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, 10000, "Amith"),
            expense(2, 4000, "Anusha"),
            expense(2, 6000, "Amith"),
        ]
    }

    #[test]
    fn test_all_time_summary() {
        let report = SummaryReport::generate(&sample(), &Settings::default(), None);

        assert_eq!(report.subtitle(), "All time");
        assert_eq!(report.total_spent, Money::from_units(20000));
        assert_eq!(report.settlement.equal_split, Money::from_units(10000));
        assert_eq!(report.by_person[0].value, Money::from_units(16000));
        assert_eq!(report.large_expenses, 2);
        assert_eq!(report.settlement.transfers.len(), 1);
        assert_eq!(report.settlement.transfers[0].from, "Anusha");
        assert_eq!(report.settlement.transfers[0].amount, Money::from_units(6000));
    }

    #[test]
    fn test_month_summary() {
        let month = MonthLabel::new(2025, 2).unwrap();
        let report = SummaryReport::generate(&sample(), &Settings::default(), Some(month));

        assert_eq!(report.subtitle(), "Feb 2025");
        assert_eq!(report.expense_count, 2);
        assert_eq!(report.settlement.transfers[0].amount, Money::from_units(1000));
    }

    #[test]
    fn test_format_terminal() {
        let report = SummaryReport::generate(&sample(), &Settings::default(), None);
        let output = report.format_terminal();

        assert!(output.contains("Expense Summary: All time"));
        assert!(output.contains("₹20,000.00"));
        assert!(output.contains("Anusha pays Amith ₹6,000.00"));
    }

    #[test]
    fn test_settled_output() {
        let report = SummaryReport::generate(&[], &Settings::default(), None);
        assert!(report.format_terminal().contains("All settled up!"));
        assert!(report.total_spent.is_zero());
    }

    #[test]
    fn test_export_csv() {
        let report = SummaryReport::generate(&sample(), &Settings::default(), None);
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Period,Type,Person,To,Amount");
        assert_eq!(lines[1], "All time,Total,,,20000.00");
        assert!(lines.contains(&"All time,Transfer,Anusha,Amith,6000.00"));
    }
}
