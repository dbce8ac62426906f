//! Per-output amount bounds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::ExactAmount;

/// Inclusive `[min, max]` range applied to every randomized output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub min: ExactAmount,
    pub max: ExactAmount,
}

impl Bounds {
    pub fn new(min: ExactAmount, max: ExactAmount) -> Self {
        Self { min, max }
    }

    /// `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, amount: ExactAmount) -> bool {
        self.min <= amount && amount <= self.max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
