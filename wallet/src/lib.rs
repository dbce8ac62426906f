//! Host side of the scrambler.
//!
//! Everything the engine deliberately leaves out lives here:
//! - Configuration loading (TOML)
//! - Destination address and spendable input loading
//! - The append-only transaction journal
//! - Rendering of the raw transaction and its `createrawtransaction` command

pub mod addresses;
pub mod command;
pub mod config;
pub mod error;
pub mod inputs;
pub mod journal;

pub use addresses::{load_addresses, parse_addresses};
pub use command::{create_raw_transaction_command, raw_transaction_json};
pub use config::ScramblerConfig;
pub use error::ScramblerError;
pub use inputs::{load_inputs, parse_inputs};
pub use journal::Journal;

use scrambler_types::TransactionPlan;

/// Load addresses and inputs named by `config` and build a plan.
///
/// Journaling is left to the caller so that a journal failure does not
/// discard a valid plan.
pub fn prepare_plan(config: &ScramblerConfig) -> Result<TransactionPlan, ScramblerError> {
    config.validate()?;
    let addresses = load_addresses(&config.outputs_file)?;
    let inputs = load_inputs(&config.inputs_file)?;
    let plan = scrambler_engine::plan(&inputs, &addresses, &config.allocation_params())?;
    Ok(plan)
}
