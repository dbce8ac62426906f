//! Uniform randomness for amount scrambling.
//!
//! The splitter never reaches for a generator directly; it draws from a
//! [`UniformSource`]. Production code uses [`SecureUniform`], which reads the
//! operating system's CSPRNG on every draw. Predictable weights would let an
//! observer reconstruct the split, so a seeded statistical generator is not
//! an acceptable substitute outside tests.

use rand::rngs::OsRng;
use rand::Rng;

/// A source of uniform values in `[0, 1)`.
pub trait UniformSource {
    /// Draw the next value in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Uniform values straight from the OS generator.
///
/// Zero-sized and stateless: every draw goes to the OS, so handles can be
/// created freely and used from any thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureUniform;

impl SecureUniform {
    pub fn new() -> Self {
        Self
    }
}

impl UniformSource for SecureUniform {
    fn next_uniform(&mut self) -> f64 {
        OsRng.gen::<f64>()
    }

    fn name(&self) -> &str {
        "os-secure"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_values_are_in_unit_interval() {
        let mut source = SecureUniform::new();
        for _ in 0..1_000 {
            let v = source.next_uniform();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn secure_values_are_not_constant() {
        let mut source = SecureUniform::new();
        let first = source.next_uniform();
        assert!((0..64).any(|_| source.next_uniform() != first));
    }

    #[test]
    fn borrowed_source_forwards() {
        let mut source = SecureUniform::new();
        let borrowed = &mut source;
        assert_eq!(borrowed.name(), "os-secure");
    }
}
