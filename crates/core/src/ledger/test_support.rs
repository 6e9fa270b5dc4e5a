//! Builders and proptest strategies shared by ledger tests.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use proptest::prelude::*;
use tally_shared::types::{TransactionId, UserId};

use super::types::{Transaction, TransactionType};

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// Builds a transaction dated `date` (`YYYY-MM-DD`), created `seq` seconds
/// after a fixed epoch.
pub fn tx(transaction_type: TransactionType, amount: i64, date: &str, seq: i64) -> Transaction {
    Transaction {
        id: TransactionId::new(),
        user_id: UserId::new(),
        transaction_type,
        category: "General".to_string(),
        amount,
        note: None,
        date: date.parse().unwrap(),
        created_at: epoch() + Duration::seconds(seq),
    }
}

pub fn transaction_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Income), Just(TransactionType::Expense)]
}

/// Dates spread over roughly three years so several months collide.
pub fn date() -> impl Strategy<Value = NaiveDate> {
    (2022i32..=2024, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

pub fn transaction() -> impl Strategy<Value = Transaction> {
    (transaction_type(), 0i64..10_000_000, date(), 0i64..100_000).prop_map(
        |(transaction_type, amount, date, seq)| Transaction {
            id: TransactionId::new(),
            user_id: UserId::new(),
            transaction_type,
            category: "General".to_string(),
            amount,
            note: None,
            date,
            created_at: epoch() + Duration::seconds(seq),
        },
    )
}

pub fn transactions() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(transaction(), 0..40)
}
