use scrambler_types::ExactAmount;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// No attempt produced a split with every part inside the bounds.
    /// Expected when the bounds are tight relative to `total / parts`.
    #[error("no valid random split found after {tries} attempts")]
    Exhausted { tries: usize },

    #[error("cannot split an amount into zero parts")]
    NoParts,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("no destination addresses supplied")]
    NoDestinations,

    #[error("minimum output {min} exceeds maximum output {max}")]
    InvalidBounds { min: ExactAmount, max: ExactAmount },

    #[error("change percentage must be between 0 and 100, got {0}")]
    InvalidChangePercent(ExactAmount),

    #[error("input amounts overflow")]
    AmountOverflow,

    #[error("insufficient funds to cover the fee: have {total}, fee {fee}")]
    InsufficientFunds { total: ExactAmount, fee: ExactAmount },

    #[error("insufficient funds to meet minimum output of {min_output} per address: need {required}, have {available}")]
    BelowMinimum {
        available: ExactAmount,
        required: ExactAmount,
        min_output: ExactAmount,
    },

    #[error("error distributing funds: {0}")]
    SplitFailed(#[from] SplitError),
}
