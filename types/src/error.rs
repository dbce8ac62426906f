//! Errors raised while constructing core types.

use thiserror::Error;

/// Failure to parse decimal text into an [`crate::ExactAmount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must not be negative: {0}")]
    Negative(String),

    #[error("invalid character {found:?} in amount {input:?}")]
    InvalidCharacter { input: String, found: char },

    #[error("amount out of range: {0}")]
    Overflow(String),
}
