//! Nullable uniform source — deterministic draws.

use scrambler_random::UniformSource;

/// A deterministic uniform source for testing.
///
/// Returns pre-configured values in order, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct NullUniform {
    values: Vec<f64>,
    index: usize,
}

impl NullUniform {
    /// Create with a sequence of deterministic values.
    ///
    /// # Panics
    /// Panics if `values` is empty or any value lies outside `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "NullUniform needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "NullUniform values must lie in [0, 1)"
        );
        Self { values, index: 0 }
    }

    /// Create with a single value that will be returned for every call.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl UniformSource for NullUniform {
    fn next_uniform(&mut self) -> f64 {
        let current = self.values[self.index % self.values.len()];
        self.index += 1;
        current
    }

    fn name(&self) -> &str {
        "null-uniform"
    }
}
