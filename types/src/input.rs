//! Spendable inputs and the references the plan carries forward.

use serde::{Deserialize, Serialize};

use crate::amount::ExactAmount;

/// Identifies a previous output: transaction id plus output index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputRef {
    pub txid: String,
    pub vout: u32,
}

/// An unspent output the plan may consume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendableInput {
    pub txid: String,
    pub vout: u32,
    pub amount: ExactAmount,
}

impl SpendableInput {
    pub fn new(txid: impl Into<String>, vout: u32, amount: ExactAmount) -> Self {
        Self {
            txid: txid.into(),
            vout,
            amount,
        }
    }

    /// The identifying part of this input, without its value.
    pub fn reference(&self) -> InputRef {
        InputRef {
            txid: self.txid.clone(),
            vout: self.vout,
        }
    }
}
