//! Fair-share balances and the settlement plan
//!
//! Everyone should have paid the same share of the group total. A roommate's
//! balance is what they paid minus that share: positive means they are owed,
//! negative means they owe. The plan pairs the largest debtor with the largest
//! creditor, moves as much as one of them needs, and repeats until every
//! balance is zero.
//!
//! Amounts are integer minor units, so balances sum to exactly zero and every
//! transfer is exact. When the total does not divide evenly, the leftover
//! minor units are carried one each by the first roster members.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use super::totals::{totals_by_person, PersonTotal};
use crate::models::{Expense, Money};

/// A roommate's position relative to their fair share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub person: String,
    /// What they actually paid
    pub paid: Money,
    /// What they should have paid
    pub fair_share: Money,
    /// `paid - fair_share`
    pub balance: Money,
}

impl Balance {
    /// Owed money by the group
    pub fn is_creditor(&self) -> bool {
        self.balance.is_positive()
    }

    /// Owes money to the group
    pub fn is_debtor(&self) -> bool {
        self.balance.is_negative()
    }
}

/// One payment instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

/// Everything the settlement card needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Group total
    pub total: Money,
    /// Equal split per person, before spreading any leftover minor units
    pub equal_split: Money,
    pub balances: Vec<Balance>,
    pub transfers: Vec<Transfer>,
}

impl SettlementPlan {
    /// Nobody owes anybody
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}

/// Split `total` into `count` shares that differ by at most one minor unit
/// and sum back to `total`. Earlier positions take the extra units.
fn fair_shares(total: Money, count: usize) -> Vec<Money> {
    let n = count as i64;
    let base = total.cents().div_euclid(n);
    let remainder = total.cents().rem_euclid(n) as usize;

    (0..count)
        .map(|i| Money::from_cents(if i < remainder { base + 1 } else { base }))
        .collect()
}

/// Balance per roster member, in roster order. Empty roster gives no balances.
pub fn balances_from_totals(totals: &[PersonTotal]) -> Vec<Balance> {
    if totals.is_empty() {
        return Vec::new();
    }

    let total: Money = totals.iter().map(|t| t.value).sum();
    let shares = fair_shares(total, totals.len());

    totals
        .iter()
        .zip(shares)
        .map(|(t, share)| Balance {
            person: t.name.clone(),
            paid: t.value,
            fair_share: share,
            balance: t.value - share,
        })
        .collect()
}

/// Balance per roster member for a snapshot of expenses
pub fn compute_balances(expenses: &[Expense], roster: &[String]) -> Vec<Balance> {
    balances_from_totals(&totals_by_person(expenses, roster))
}

/// Greedy largest-first pairing of debtors with creditors.
///
/// Debtors and creditors are each ordered by magnitude, largest first, with a
/// stable sort so equal magnitudes keep roster order.
pub fn settle_balances(balances: &[Balance]) -> Vec<Transfer> {
    let mut debtors: Vec<(&str, Money)> = balances
        .iter()
        .filter(|b| b.is_debtor())
        .map(|b| (b.person.as_str(), b.balance.abs()))
        .collect();
    let mut creditors: Vec<(&str, Money)> = balances
        .iter()
        .filter(|b| b.is_creditor())
        .map(|b| (b.person.as_str(), b.balance))
        .collect();

    debtors.sort_by_key(|(_, owed)| Reverse(*owed));
    creditors.sort_by_key(|(_, due)| Reverse(*due));

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].1.min(creditors[j].1);

        if amount.is_positive() {
            transfers.push(Transfer {
                from: debtors[i].0.to_string(),
                to: creditors[j].0.to_string(),
                amount,
            });
        }

        debtors[i].1 -= amount;
        creditors[j].1 -= amount;

        if debtors[i].1.is_zero() {
            i += 1;
        }
        if creditors[j].1.is_zero() {
            j += 1;
        }
    }

    transfers
}

/// Transfers that bring every roster member back to their fair share
pub fn compute_settlement(expenses: &[Expense], roster: &[String]) -> Vec<Transfer> {
    settle_balances(&compute_balances(expenses, roster))
}

/// Balances, equal split and transfers in one pass
pub fn settlement_plan(expenses: &[Expense], roster: &[String]) -> SettlementPlan {
    let balances = compute_balances(expenses, roster);
    let total: Money = balances.iter().map(|b| b.paid).sum();
    let equal_split = if roster.is_empty() {
        Money::zero()
    } else {
        Money::from_cents(total.cents().div_euclid(roster.len() as i64))
    };
    let transfers = settle_balances(&balances);

    tracing::debug!(
        expenses = expenses.len(),
        roommates = roster.len(),
        transfers = transfers.len(),
        "computed settlement plan"
    );

    SettlementPlan {
        total,
        equal_split,
        balances,
        transfers,
    }
}
