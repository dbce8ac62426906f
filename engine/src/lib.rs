//! Fund-splitting engine.
//!
//! Two layers:
//! - [`split`] — bounded, exact-sum random partition by rejection sampling
//! - [`allocate`] — fee, change and clamping around a single split, producing
//!   a fully reconciled [`TransactionPlan`](scrambler_types::TransactionPlan)
//!
//! Both are pure functions of their arguments plus an injected
//! [`UniformSource`](scrambler_random::UniformSource); nothing is retained
//! between calls.

pub mod allocate;
pub mod error;
pub mod split;

pub use allocate::{breakdown, plan, plan_with, AllocationParams, Breakdown};
pub use error::{AllocationError, SplitError};
pub use split::{random_split, random_split_with, DEFAULT_MAX_TRIES};
