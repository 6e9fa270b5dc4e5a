//! Personal income/expense ledger logic.
//!
//! This module implements the computed parts of the ledger:
//! - Domain types for transactions and their creation input
//! - Business rule validation for new transactions
//! - Calendar month keys
//! - Balance summary (income, expense, balance)
//! - Month grouping for the dashboard
//! - Error types for ledger operations

pub mod error;
pub mod grouping;
pub mod month;
pub mod summary;
pub mod types;
pub mod validation;

#[cfg(test)]
mod grouping_props;
#[cfg(test)]
mod summary_props;
#[cfg(test)]
pub(crate) mod test_support;

pub use error::LedgerError;
pub use grouping::{MonthGroup, MonthGroups, group_by_month};
pub use month::MonthKey;
pub use summary::Summary;
pub use types::{NewTransaction, Transaction, TransactionType};
pub use validation::{MAX_CATEGORY_LEN, MAX_NOTE_LEN};
