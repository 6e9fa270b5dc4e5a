//! Business rule validation for new transactions.

use super::{error::LedgerError, types::NewTransaction};

/// Maximum category length, in characters.
pub const MAX_CATEGORY_LEN: usize = 255;

/// Maximum note length, in characters.
pub const MAX_NOTE_LEN: usize = 1000;

impl NewTransaction {
    /// Checks the input and returns it normalized.
    ///
    /// The category is trimmed; a blank note becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks.
    pub fn validated(self) -> Result<Self, LedgerError> {
        if self.amount < 0 {
            return Err(LedgerError::NegativeAmount);
        }

        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(LedgerError::EmptyCategory);
        }
        if category.chars().count() > MAX_CATEGORY_LEN {
            return Err(LedgerError::CategoryTooLong {
                max: MAX_CATEGORY_LEN,
            });
        }

        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if note.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTE_LEN) {
            return Err(LedgerError::NoteTooLong { max: MAX_NOTE_LEN });
        }

        Ok(Self {
            category,
            note,
            ..self
        })
    }
}
