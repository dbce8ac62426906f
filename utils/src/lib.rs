//! Shared utilities for the scrambler.

pub mod logging;

pub use logging::{init_logging, LogFormat};
