//! Fundamental types for the scrambler.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: exact amounts, output bounds, destinations, spendable inputs and the
//! transaction plan.

pub mod address;
pub mod amount;
pub mod bounds;
pub mod error;
pub mod input;
pub mod plan;

pub use address::Destination;
pub use amount::{ExactAmount, DECIMALS, UNITS_PER_COIN};
pub use bounds::Bounds;
pub use error::AmountError;
pub use input::{InputRef, SpendableInput};
pub use plan::{OutputMap, TransactionPlan};
