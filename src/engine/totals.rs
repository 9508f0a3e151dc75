//! Category and person rollups

use serde::{Deserialize, Serialize};

use crate::models::{Expense, Money};

/// Amount spent in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: Money,
}

/// Amount one roommate has paid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonTotal {
    pub name: String,
    pub value: Money,
}

/// Sum of every expense amount
pub fn total_spent(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Totals for each configured category, in category order.
///
/// Categories with nothing spent are left out; a zero-width slice has no
/// place in a share breakdown. Expenses whose category is not configured are
/// not counted here.
pub fn totals_by_category(expenses: &[Expense], categories: &[String]) -> Vec<CategoryTotal> {
    categories
        .iter()
        .map(|category| CategoryTotal {
            name: category.clone(),
            value: expenses
                .iter()
                .filter(|e| &e.category == category)
                .map(|e| e.amount)
                .sum(),
        })
        .filter(|total| !total.value.is_zero())
        .collect()
}

/// Totals for every roster member, in roster order, including zeros.
///
/// Settlement depends on every roommate being present here.
pub fn totals_by_person(expenses: &[Expense], roster: &[String]) -> Vec<PersonTotal> {
    roster
        .iter()
        .map(|person| PersonTotal {
            name: person.clone(),
            value: expenses
                .iter()
                .filter(|e| &e.paid_by == person)
                .map(|e| e.amount)
                .sum(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(category: &str, units: i64, paid_by: &str) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            "item",
            category,
            Money::from_units(units),
            paid_by,
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_category_totals_omit_zero_categories() {
        let expenses = vec![expense("Rent", 1000, "A")];
        let totals = totals_by_category(&expenses, &names(&["Rent", "Food"]));

        assert_eq!(
            totals,
            vec![CategoryTotal {
                name: "Rent".into(),
                value: Money::from_units(1000)
            }]
        );
    }

    #[test]
    fn test_category_totals_follow_category_order() {
        let expenses = vec![
            expense("Food", 50, "A"),
            expense("Rent", 1000, "B"),
            expense("Food", 25, "B"),
            expense("Parking", 10, "A"),
        ];
        let totals = totals_by_category(&expenses, &names(&["Rent", "Food", "Internet"]));

        let rendered: Vec<(&str, i64)> = totals
            .iter()
            .map(|t| (t.name.as_str(), t.value.units()))
            .collect();
        assert_eq!(rendered, vec![("Rent", 1000), ("Food", 75)]);
    }

    #[test]
    fn test_person_totals_include_everyone() {
        let expenses = vec![expense("Rent", 1000, "A"), expense("Food", 30, "A")];
        let totals = totals_by_person(&expenses, &names(&["A", "B"]));

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].name, "A");
        assert_eq!(totals[0].value, Money::from_units(1030));
        assert_eq!(totals[1].name, "B");
        assert!(totals[1].value.is_zero());
    }

    #[test]
    fn test_total_spent() {
        let expenses = vec![expense("Rent", 1000, "A"), expense("Food", 30, "B")];
        assert_eq!(total_spent(&expenses), Money::from_units(1030));
        assert_eq!(total_spent(&[]), Money::zero());
    }
}
