//! String-backed enums stored in entity columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored form of a transaction's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<tally_core::ledger::TransactionType> for TransactionType {
    fn from(value: tally_core::ledger::TransactionType) -> Self {
        match value {
            tally_core::ledger::TransactionType::Income => Self::Income,
            tally_core::ledger::TransactionType::Expense => Self::Expense,
        }
    }
}

impl From<TransactionType> for tally_core::ledger::TransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}
