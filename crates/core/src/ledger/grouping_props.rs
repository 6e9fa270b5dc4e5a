//! Property-based tests for month grouping.
//!
//! - Groups partition the input
//! - Each group holds a single month; no month appears twice
//! - At most one group starts expanded
//! - Grouping an already grouped list is a no-op

use std::collections::HashSet;

use proptest::prelude::*;

use super::grouping::group_by_month;
use super::month::MonthKey;
use super::test_support::{date, transactions};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_groups_partition_input(txs in transactions(), today in date()) {
        let count = txs.len();
        let mut ids: Vec<_> = txs.iter().map(|t| t.id).collect();
        let groups = group_by_month(txs, today);
        let mut grouped: Vec<_> = groups.flatten().iter().map(|t| t.id).collect();

        prop_assert_eq!(grouped.len(), count);
        ids.sort_by_key(|id| id.into_inner());
        grouped.sort_by_key(|id| id.into_inner());
        prop_assert_eq!(ids, grouped);
        prop_assert!(groups.iter().all(|g| !g.transactions.is_empty()));
    }

    #[test]
    fn prop_one_month_per_group(txs in transactions(), today in date()) {
        let groups = group_by_month(txs, today);
        let mut seen = HashSet::new();

        for group in &groups {
            prop_assert!(seen.insert(group.key));
            prop_assert!(group.transactions.iter().all(|t| MonthKey::of(t.date) == group.key));
        }

        let keys: Vec<MonthKey> = groups.iter().map(|g| g.key).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn prop_flattened_is_sorted_newest_first(txs in transactions(), today in date()) {
        let flat = group_by_month(txs, today).flatten();
        prop_assert!(flat
            .windows(2)
            .all(|w| (w[0].date, w[0].created_at) >= (w[1].date, w[1].created_at)));
    }

    #[test]
    fn prop_at_most_one_expanded(txs in transactions(), today in date()) {
        let groups = group_by_month(txs, today);
        let expanded: Vec<_> = groups.iter().filter(|g| g.expanded).collect();

        prop_assert!(expanded.len() <= 1);
        if let Some(group) = expanded.first() {
            prop_assert_eq!(group.key, MonthKey::of(today));
        }
    }

    #[test]
    fn prop_regrouping_is_idempotent(txs in transactions(), today in date()) {
        let once = group_by_month(txs, today);
        let twice = group_by_month(once.flatten(), today);
        prop_assert_eq!(once, twice);
    }
}
