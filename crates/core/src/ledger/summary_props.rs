//! Property-based tests for balance summaries.
//!
//! - Balance always equals income minus expense
//! - Summaries are independent of input order
//! - Summing per-month groups gives the overall summary

use proptest::prelude::*;

use super::grouping::group_by_month;
use super::summary::Summary;
use super::test_support::{date, transactions};
use super::types::TransactionType;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_balance_is_income_minus_expense(txs in transactions()) {
        let summary = Summary::from_transactions(&txs);
        prop_assert_eq!(summary.balance, summary.income - summary.expense);
        prop_assert!(summary.income >= 0);
        prop_assert!(summary.expense >= 0);
    }

    #[test]
    fn prop_sides_match_filtered_sums(txs in transactions()) {
        let summary = Summary::from_transactions(&txs);
        let income: i64 = txs
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Income)
            .map(|t| t.amount)
            .sum();
        let expense: i64 = txs
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense)
            .map(|t| t.amount)
            .sum();
        prop_assert_eq!(summary, Summary::from_totals(income, expense));
    }

    #[test]
    fn prop_order_independent(txs in transactions()) {
        let mut reversed = txs.clone();
        reversed.reverse();
        prop_assert_eq!(Summary::from_transactions(&txs), Summary::from_transactions(&reversed));
    }

    #[test]
    fn prop_group_summaries_add_up(txs in transactions(), today in date()) {
        let overall = Summary::from_transactions(&txs);
        let groups = group_by_month(txs, today);
        let (income, expense) = groups.iter().map(|g| g.summary()).fold((0, 0), |(i, e), s| {
            (i + s.income, e + s.expense)
        });
        prop_assert_eq!(overall, Summary::from_totals(income, expense));
    }
}
