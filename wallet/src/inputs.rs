//! Spendable input loading from JSON.
//!
//! The document must be a list of `{ "txid": ..., "vout": ..., "amount": ... }`
//! objects. Amounts may be numbers or strings and are parsed exactly.

use std::path::Path;

use scrambler_types::SpendableInput;

use crate::ScramblerError;

/// Parse a JSON input list.
pub fn parse_inputs(json: &str) -> Result<Vec<SpendableInput>, ScramblerError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(ScramblerError::Inputs(
            "expected a list of input objects".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| ScramblerError::Inputs(e.to_string()))
}

/// Load the input list at `path`.
pub fn load_inputs(path: &Path) -> Result<Vec<SpendableInput>, ScramblerError> {
    let json = std::fs::read_to_string(path).map_err(|source| ScramblerError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let inputs = parse_inputs(&json)?;
    tracing::debug!(count = inputs.len(), "loaded spendable inputs");
    Ok(inputs)
}
