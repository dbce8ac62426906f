//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (here: randomness) are abstracted behind traits.
//! This crate provides test-friendly implementations that return
//! deterministic values and can be controlled programmatically.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod uniform;

pub use uniform::NullUniform;
