//! Bounded, exact-sum random partition of an amount.
//!
//! Each attempt draws one uniform weight per part, hands every part its
//! weight-proportional share of the total (truncated to whole units), and
//! adds whatever truncation left over to the first part. The attempt is
//! kept only if every part lands inside the bounds; otherwise it is thrown
//! away and a fresh set of weights is drawn.

use scrambler_random::{SecureUniform, UniformSource};
use scrambler_types::{Bounds, ExactAmount};

use crate::error::SplitError;

/// Attempt budget used when the caller does not pick one.
pub const DEFAULT_MAX_TRIES: usize = 10_000;

/// Uniform draws are scaled to 53-bit integers, the full mantissa width of
/// an f64 in `[0, 1)`.
const WEIGHT_SCALE: f64 = (1u64 << 53) as f64;

/// Split `total` into `parts` amounts within `bounds`, drawing weights from
/// the OS generator.
pub fn random_split(
    total: ExactAmount,
    parts: usize,
    bounds: Bounds,
    max_tries: usize,
) -> Result<Vec<ExactAmount>, SplitError> {
    random_split_with(&mut SecureUniform::new(), total, parts, bounds, max_tries)
}

/// Split `total` into `parts` amounts within `bounds`, drawing weights from
/// `source`.
///
/// On success the parts sum to exactly `total` and each lies in `bounds`.
/// Fails with [`SplitError::Exhausted`] once `max_tries` attempts have been
/// rejected.
pub fn random_split_with<R>(
    source: &mut R,
    total: ExactAmount,
    parts: usize,
    bounds: Bounds,
    max_tries: usize,
) -> Result<Vec<ExactAmount>, SplitError>
where
    R: UniformSource + ?Sized,
{
    if parts == 0 {
        return Err(SplitError::NoParts);
    }

    for attempt in 1..=max_tries {
        let weights: Vec<u64> = (0..parts)
            .map(|_| to_weight(source.next_uniform()))
            .collect();

        let Some(candidate) = proportional_split(total, &weights) else {
            continue;
        };

        if candidate.iter().all(|&amount| bounds.contains(amount)) {
            tracing::debug!(attempt, parts, %total, "random split accepted");
            return Ok(candidate);
        }
    }

    tracing::warn!(
        max_tries,
        parts,
        %total,
        %bounds,
        source = source.name(),
        "random split exhausted its attempt budget"
    );
    Err(SplitError::Exhausted { tries: max_tries })
}

fn to_weight(uniform: f64) -> u64 {
    (uniform.clamp(0.0, 1.0) * WEIGHT_SCALE) as u64
}

/// Weight-proportional shares of `total`, truncated, with the residual on
/// the first share. `None` if every weight is zero.
fn proportional_split(total: ExactAmount, weights: &[u64]) -> Option<Vec<ExactAmount>> {
    let weight_sum: u128 = weights.iter().map(|&w| u128::from(w)).sum();
    if weight_sum == 0 {
        return None;
    }

    let total_units = u128::from(total.units());
    let mut shares = weights
        .iter()
        .map(|&w| {
            // w <= weight_sum, so each share is at most `total`.
            u64::try_from(u128::from(w) * total_units / weight_sum)
                .ok()
                .map(ExactAmount::from_units)
        })
        .collect::<Option<Vec<_>>>()?;

    let allocated = ExactAmount::checked_sum(shares.iter().copied())?;
    let residual = total.checked_sub(allocated)?;
    shares[0] = shares[0].checked_add(residual)?;
    Some(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrambler_nullables::NullUniform;

    fn amt(s: &str) -> ExactAmount {
        s.parse().unwrap()
    }

    fn units(values: &[u64]) -> Vec<ExactAmount> {
        values.iter().copied().map(ExactAmount::from_units).collect()
    }

    fn wide() -> Bounds {
        Bounds::new(ExactAmount::ZERO, ExactAmount::MAX)
    }

    #[test]
    fn exact_weights_give_exact_shares() {
        let mut source = NullUniform::new(vec![0.5, 0.25, 0.25]);
        let split = random_split_with(&mut source, amt("1"), 3, wide(), 1).unwrap();
        assert_eq!(split, vec![amt("0.5"), amt("0.25"), amt("0.25")]);
    }

    #[test]
    fn residual_goes_to_first_part() {
        // Shares before reconciliation: 5, 2.5 -> 2, 2.5 -> 2. One unit left.
        let mut source = NullUniform::new(vec![0.5, 0.25, 0.25]);
        let split =
            random_split_with(&mut source, ExactAmount::from_units(10), 3, wide(), 1).unwrap();
        assert_eq!(split, units(&[6, 2, 2]));
    }

    #[test]
    fn residual_lands_on_first_even_when_smallest() {
        // Weights 1:3:3 of 10 units -> 1.43 -> 1, 4.29 -> 4, 4. Residual 1.
        let mut source = NullUniform::new(vec![0.125, 0.375, 0.375]);
        let split =
            random_split_with(&mut source, ExactAmount::from_units(10), 3, wide(), 1).unwrap();
        assert_eq!(split, units(&[2, 4, 4]));
    }

    #[test]
    fn rejected_attempts_are_retried() {
        // First attempt 0.9/0.1 puts 9 of 10 units in part one, over the
        // max of 6. Second attempt 0.5/0.5 is accepted.
        let mut source = NullUniform::new(vec![0.9, 0.1, 0.5, 0.5]);
        let bounds = Bounds::new(ExactAmount::from_units(4), ExactAmount::from_units(6));
        let split =
            random_split_with(&mut source, ExactAmount::from_units(10), 2, bounds, 5).unwrap();
        assert_eq!(split, units(&[5, 5]));
        assert_eq!(source.draws(), 4);
    }

    #[test]
    fn all_zero_weights_are_discarded() {
        let mut source = NullUniform::new(vec![0.0, 0.0, 0.5, 0.5]);
        let split = random_split_with(&mut source, amt("2"), 2, wide(), 2).unwrap();
        assert_eq!(split, vec![amt("1"), amt("1")]);
    }

    #[test]
    fn infeasible_bounds_exhaust() {
        let mut source = NullUniform::new(vec![0.3, 0.6, 0.9]);
        let bounds = Bounds::new(amt("5"), amt("6"));
        let err = random_split_with(&mut source, amt("1"), 3, bounds, 25).unwrap_err();
        assert_eq!(err, SplitError::Exhausted { tries: 25 });
        assert_eq!(source.draws(), 75);
    }

    #[test]
    fn zero_parts_is_a_distinct_error() {
        let err = random_split(amt("1"), 0, wide(), DEFAULT_MAX_TRIES).unwrap_err();
        assert_eq!(err, SplitError::NoParts);
    }

    #[test]
    fn zero_budget_exhausts_immediately() {
        let err = random_split(amt("1"), 2, wide(), 0).unwrap_err();
        assert_eq!(err, SplitError::Exhausted { tries: 0 });
    }

    #[test]
    fn single_part_takes_everything() {
        let split = random_split(amt("3.14159265"), 1, wide(), 10).unwrap();
        assert_eq!(split, vec![amt("3.14159265")]);
    }

    #[test]
    fn secure_split_sums_exactly() {
        let total = amt("9.999");
        let bounds = Bounds::new(amt("0.01"), amt("9.99999999"));
        let split = random_split(total, 3, bounds, DEFAULT_MAX_TRIES).unwrap();
        assert_eq!(split.len(), 3);
        assert_eq!(ExactAmount::checked_sum(split.iter().copied()), Some(total));
        assert!(split.iter().all(|&a| bounds.contains(a)));
    }
}
