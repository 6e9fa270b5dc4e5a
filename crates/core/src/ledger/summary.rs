//! Balance summary: total income, total expense and their difference.

use serde::{Deserialize, Serialize};

use super::types::{Transaction, TransactionType};

/// Aggregate income/expense/balance for a set of transactions.
///
/// `income` and `expense` are never negative for validated data; `balance` may be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// `income - expense`.
    pub balance: i64,
    /// Sum of income amounts.
    pub income: i64,
    /// Sum of expense amounts.
    pub expense: i64,
}

impl Summary {
    /// Builds a summary from precomputed totals.
    #[must_use]
    pub const fn from_totals(income: i64, expense: i64) -> Self {
        Self {
            balance: income.saturating_sub(expense),
            income,
            expense,
        }
    }

    /// Folds a transaction set into a summary.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Self::default(), |mut summary, tx| {
                summary.record(tx.transaction_type, tx.amount);
                summary
            })
    }

    /// Adds one amount to the matching side.
    pub fn record(&mut self, transaction_type: TransactionType, amount: i64) {
        match transaction_type {
            TransactionType::Income => self.income = self.income.saturating_add(amount),
            TransactionType::Expense => self.expense = self.expense.saturating_add(amount),
        }
        self.balance = self.income.saturating_sub(self.expense);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::tx;

    #[test]
    fn test_empty_set_is_all_zero() {
        let none: [Transaction; 0] = [];
        let summary = Summary::from_transactions(&none);
        assert_eq!(summary, Summary::default());
        assert_eq!(
            summary,
            Summary {
                balance: 0,
                income: 0,
                expense: 0
            }
        );
    }

    #[test]
    fn test_mixed_transactions() {
        let transactions = [
            tx(TransactionType::Income, 1000, "2024-01-05", 0),
            tx(TransactionType::Expense, 300, "2024-01-10", 1),
            tx(TransactionType::Income, 500, "2024-02-01", 2),
        ];

        let summary = Summary::from_transactions(&transactions);

        assert_eq!(summary.income, 1500);
        assert_eq!(summary.expense, 300);
        assert_eq!(summary.balance, 1200);
    }

    #[test]
    fn test_balance_may_go_negative() {
        let transactions = [
            tx(TransactionType::Income, 100, "2024-01-05", 0),
            tx(TransactionType::Expense, 250, "2024-01-06", 1),
        ];

        assert_eq!(Summary::from_transactions(&transactions).balance, -150);
    }

    #[test]
    fn test_from_totals_matches_fold() {
        let transactions = [
            tx(TransactionType::Income, 40, "2024-05-01", 0),
            tx(TransactionType::Expense, 15, "2024-05-02", 1),
        ];
        assert_eq!(
            Summary::from_totals(40, 15),
            Summary::from_transactions(&transactions)
        );
    }

    #[test]
    fn test_serializes_in_wire_order() {
        let json = serde_json::to_string(&Summary::from_totals(1500, 300)).unwrap();
        assert_eq!(json, r#"{"balance":1200,"income":1500,"expense":300}"#);
    }
}
