//! The transaction plan produced by the allocator.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::address::Destination;
use crate::amount::ExactAmount;
use crate::input::InputRef;

/// Insertion-ordered mapping from destination to amount.
///
/// Inserting an address that is already present replaces its amount in
/// place, keeping the original position (last write wins).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputMap {
    entries: Vec<(Destination, ExactAmount)>,
}

impl OutputMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or overwrite. Returns the amount that was replaced, if any.
    ///
    /// Lookup is a linear scan, so filling the map is quadratic in the
    /// number of addresses.
    pub fn insert(&mut self, address: Destination, amount: ExactAmount) -> Option<ExactAmount> {
        match self.entries.iter_mut().find(|(a, _)| *a == address) {
            Some((_, existing)) => Some(std::mem::replace(existing, amount)),
            None => {
                self.entries.push((address, amount));
                None
            }
        }
    }

    pub fn get(&self, address: &Destination) -> Option<ExactAmount> {
        self.entries
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, amount)| *amount)
    }

    pub fn contains(&self, address: &Destination) -> bool {
        self.get(address).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Destination, ExactAmount)> {
        self.entries.iter().map(|(a, amount)| (a, *amount))
    }

    /// Sum of all amounts, `None` on overflow.
    pub fn total(&self) -> Option<ExactAmount> {
        ExactAmount::checked_sum(self.entries.iter().map(|(_, amount)| *amount))
    }
}

impl Serialize for OutputMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (address, amount) in &self.entries {
            map.serialize_entry(address, amount)?;
        }
        map.end()
    }
}

/// A fully reconciled transaction: which inputs to spend and where the
/// funds go.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TransactionPlan {
    /// Inputs in the order they were supplied.
    pub inputs: Vec<InputRef>,
    pub outputs: OutputMap,
}
