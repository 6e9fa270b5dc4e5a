//! Ledger domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::{TransactionId, UserId};

use super::error::LedgerError;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// Returns the wire/storage string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::UnknownType(other.to_string())),
        }
    }
}

/// A recorded income or expense. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning user.
    pub user_id: UserId,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Free-form category label.
    pub category: String,
    /// Non-negative amount in the user's currency units.
    pub amount: i64,
    /// Optional note.
    pub note: Option<String>,
    /// Calendar date the money moved.
    pub date: NaiveDate,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTransaction {
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category label.
    pub category: String,
    /// Amount; must be non-negative.
    pub amount: i64,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
    /// Calendar date the money moved.
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(TransactionType::from_str("income").unwrap(), TransactionType::Income);
        assert_eq!(TransactionType::from_str("expense").unwrap(), TransactionType::Expense);
        assert!(matches!(
            TransactionType::from_str("transfer"),
            Err(LedgerError::UnknownType(t)) if t == "transfer"
        ));
    }

    #[test]
    fn test_new_transaction_deserializes_wire_shape() {
        let input: NewTransaction = serde_json::from_value(serde_json::json!({
            "type": "expense",
            "category": "Food",
            "amount": 25000,
            "date": "2024-03-09"
        }))
        .unwrap();

        assert_eq!(input.transaction_type, TransactionType::Expense);
        assert_eq!(input.amount, 25000);
        assert_eq!(input.note, None);
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_new_transaction_rejects_fractional_amount() {
        let result: Result<NewTransaction, _> = serde_json::from_value(serde_json::json!({
            "type": "income",
            "category": "Salary",
            "amount": 10.5,
            "date": "2024-03-09"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_serializes_type_field() {
        let tx = Transaction {
            id: TransactionId::new(),
            user_id: UserId::new(),
            transaction_type: TransactionType::Income,
            category: "Salary".into(),
            amount: 1000,
            note: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["amount"], 1000);
    }
}
