//! Ledger error types.

use tally_shared::AppError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount below zero.
    #[error("The amount must be a non-negative integer")]
    NegativeAmount,

    /// Category missing or blank.
    #[error("The category field is required")]
    EmptyCategory,

    /// Category longer than allowed.
    #[error("The category may not be greater than {max} characters")]
    CategoryTooLong {
        /// Maximum length in characters.
        max: usize,
    },

    /// Note longer than allowed.
    #[error("The note may not be greater than {max} characters")]
    NoteTooLong {
        /// Maximum length in characters.
        max: usize,
    },

    /// Type is neither income nor expense.
    #[error("The selected type is invalid: {0}")]
    UnknownType(String),

    /// Month string is not `YYYY-MM`.
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::EmptyCategory => "EMPTY_CATEGORY",
            Self::CategoryTooLong { .. } => "CATEGORY_TOO_LONG",
            Self::NoteTooLong { .. } => "NOTE_TOO_LONG",
            Self::UnknownType(_) => "UNKNOWN_TYPE",
            Self::InvalidMonth(_) => "INVALID_MONTH",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}
