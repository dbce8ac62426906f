//! Amount reconciliation: inputs, fee and change in, balanced plan out.
//!
//! `distributable = total - fee` is divided into a deterministic change
//! carve-out and a randomized part. The randomized part is clamped to what
//! the destinations can absorb at `max_output` each; anything above that
//! is added to the change output so the plan always spends exactly
//! `total - fee`.

use scrambler_random::{SecureUniform, UniformSource};
use scrambler_types::{
    Bounds, Destination, ExactAmount, OutputMap, SpendableInput, TransactionPlan,
};

use crate::error::AllocationError;
use crate::split::{random_split_with, DEFAULT_MAX_TRIES};

/// Everything besides inputs and destinations that shapes a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationParams {
    pub fee: ExactAmount,
    /// Bounds applied to every randomized output.
    pub bounds: Bounds,
    /// Share of the distributable amount (0..=100) carved out as change.
    pub change_percent: ExactAmount,
    pub change_address: Destination,
    /// Attempt budget handed to the splitter.
    pub max_tries: usize,
}

impl AllocationParams {
    pub fn new(
        fee: ExactAmount,
        min_output: ExactAmount,
        max_output: ExactAmount,
        change_percent: ExactAmount,
        change_address: impl Into<Destination>,
    ) -> Self {
        Self {
            fee,
            bounds: Bounds::new(min_output, max_output),
            change_percent,
            change_address: change_address.into(),
            max_tries: DEFAULT_MAX_TRIES,
        }
    }

    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }
}

/// The scalar quantities of one allocation, before any randomness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakdown {
    /// Sum of all input amounts.
    pub total: ExactAmount,
    /// `total - fee`.
    pub distributable: ExactAmount,
    /// `truncate8(distributable * change_percent / 100)`.
    pub change: ExactAmount,
    /// `distributable - change`.
    pub random: ExactAmount,
    /// The amount handed to the splitter: `min(random, n * max_output)`.
    pub target: ExactAmount,
    /// `random - target`, routed to the change address.
    pub excess: ExactAmount,
}

impl Breakdown {
    /// Amount written to the change address.
    pub fn change_output(&self) -> ExactAmount {
        self.change + self.excess
    }
}

/// Compute the scalar breakdown for `inputs` spread over `destinations`
/// outputs.
pub fn breakdown(
    inputs: &[SpendableInput],
    destinations: usize,
    params: &AllocationParams,
) -> Result<Breakdown, AllocationError> {
    if destinations == 0 {
        return Err(AllocationError::NoDestinations);
    }
    let bounds = params.bounds;
    if !bounds.is_valid() {
        return Err(AllocationError::InvalidBounds {
            min: bounds.min,
            max: bounds.max,
        });
    }
    let hundred = ExactAmount::from_coins(100).ok_or(AllocationError::AmountOverflow)?;
    if params.change_percent > hundred {
        return Err(AllocationError::InvalidChangePercent(params.change_percent));
    }

    let total = ExactAmount::checked_sum(inputs.iter().map(|input| input.amount))
        .ok_or(AllocationError::AmountOverflow)?;
    if total <= params.fee {
        return Err(AllocationError::InsufficientFunds {
            total,
            fee: params.fee,
        });
    }

    let distributable = total - params.fee;
    let change = distributable
        .percent(params.change_percent)
        .ok_or(AllocationError::AmountOverflow)?;
    let random = distributable - change;

    let count = destinations as u64;
    let required = bounds.min.saturating_mul(count);
    if random < required {
        return Err(AllocationError::BelowMinimum {
            available: random,
            required,
            min_output: bounds.min,
        });
    }

    let target = random.min(bounds.max.saturating_mul(count));

    Ok(Breakdown {
        total,
        distributable,
        change,
        random,
        target,
        excess: random - target,
    })
}

/// Build a plan using the OS generator for the random split.
pub fn plan(
    inputs: &[SpendableInput],
    destinations: &[Destination],
    params: &AllocationParams,
) -> Result<TransactionPlan, AllocationError> {
    plan_with(&mut SecureUniform::new(), inputs, destinations, params)
}

/// Build a plan, drawing split weights from `source`.
pub fn plan_with<R>(
    source: &mut R,
    inputs: &[SpendableInput],
    destinations: &[Destination],
    params: &AllocationParams,
) -> Result<TransactionPlan, AllocationError>
where
    R: UniformSource + ?Sized,
{
    let breakdown = breakdown(inputs, destinations.len(), params)?;
    tracing::debug!(
        total = %breakdown.total,
        fee = %params.fee,
        change = %breakdown.change,
        target = %breakdown.target,
        destinations = destinations.len(),
        "allocation breakdown"
    );

    if !breakdown.excess.is_zero() {
        tracing::warn!(
            excess = %breakdown.excess,
            change_address = %params.change_address,
            "funds exceed what destinations can hold at max_output; routing excess to change"
        );
    }

    let amounts = random_split_with(
        source,
        breakdown.target,
        destinations.len(),
        params.bounds,
        params.max_tries,
    )?;

    let mut outputs = OutputMap::with_capacity(destinations.len() + 1);
    for (destination, amount) in destinations.iter().zip(amounts) {
        if let Some(previous) = outputs.insert(destination.clone(), amount) {
            tracing::warn!(
                address = %destination,
                dropped = %previous,
                "duplicate destination; earlier amount replaced"
            );
        }
    }

    let change_output = breakdown.change_output();
    if !change_output.is_zero() {
        if let Some(previous) = outputs.insert(params.change_address.clone(), change_output) {
            tracing::warn!(
                address = %params.change_address,
                dropped = %previous,
                "change address is also a destination; split amount replaced by change"
            );
        }
    }

    let inputs = inputs.iter().map(SpendableInput::reference).collect();

    tracing::info!(
        total = %breakdown.total,
        outputs = outputs.len(),
        "transaction plan built"
    );
    Ok(TransactionPlan { inputs, outputs })
}
