//! Month grouping for the dashboard view.
//!
//! Transactions are ordered newest first and chunked into contiguous runs
//! sharing the same calendar month. Only the group for the current month
//! starts expanded.

use chrono::NaiveDate;
use serde::Serialize;

use super::{month::MonthKey, summary::Summary, types::Transaction};

/// One calendar month of transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    /// Month shared by every transaction in the group.
    pub key: MonthKey,
    /// Transactions, newest first.
    pub transactions: Vec<Transaction>,
    /// Whether the group is shown expanded.
    pub expanded: bool,
}

impl MonthGroup {
    /// Flips the expanded flag.
    pub const fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Totals for the transactions in this group.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_transactions(&self.transactions)
    }
}

/// Ordered month groups, newest month first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthGroups(Vec<MonthGroup>);

impl MonthGroups {
    /// Flips the group for `key`. Returns `false` if no such group exists.
    pub fn toggle(&mut self, key: MonthKey) -> bool {
        match self.0.iter_mut().find(|g| g.key == key) {
            Some(group) => {
                group.toggle();
                true
            }
            None => false,
        }
    }

    /// Looks up the group for `key`.
    #[must_use]
    pub fn get(&self, key: MonthKey) -> Option<&MonthGroup> {
        self.0.iter().find(|g| g.key == key)
    }

    /// Iterates groups in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, MonthGroup> {
        self.0.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenates every group's transactions in display order.
    #[must_use]
    pub fn flatten(&self) -> Vec<Transaction> {
        self.0
            .iter()
            .flat_map(|g| g.transactions.iter().cloned())
            .collect()
    }

    /// Consumes the wrapper.
    #[must_use]
    pub fn into_inner(self) -> Vec<MonthGroup> {
        self.0
    }
}

impl<'a> IntoIterator for &'a MonthGroups {
    type Item = &'a MonthGroup;
    type IntoIter = std::slice::Iter<'a, MonthGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Sorts transactions newest first and groups them by calendar month.
///
/// Ties on `date` are broken by `created_at`, newest first. The group whose
/// month contains `today` is expanded; all others are collapsed.
#[must_use]
pub fn group_by_month(mut transactions: Vec<Transaction>, today: NaiveDate) -> MonthGroups {
    transactions.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    let current = MonthKey::of(today);
    let mut groups: Vec<MonthGroup> = Vec::new();

    for tx in transactions {
        let key = MonthKey::of(tx.date);
        match groups.last_mut() {
            Some(group) if group.key == key => group.transactions.push(tx),
            _ => groups.push(MonthGroup {
                key,
                transactions: vec![tx],
                expanded: key == current,
            }),
        }
    }

    MonthGroups(groups)
}
