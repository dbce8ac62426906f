use scrambler_engine::AllocationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScramblerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("error reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no output addresses found in {0}")]
    NoAddresses(String),

    #[error("error parsing inputs: {0}")]
    Inputs(String),

    #[error("error logging transaction to {path}: {source}")]
    Journal {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
