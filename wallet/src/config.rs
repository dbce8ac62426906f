//! Scrambler configuration with TOML file support.

use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use scrambler_engine::{AllocationParams, DEFAULT_MAX_TRIES};
use scrambler_types::{Bounds, Destination, ExactAmount};
use scrambler_utils::LogFormat;

use crate::ScramblerError;

/// Configuration for one scrambling run.
///
/// Can be loaded from a TOML file via [`ScramblerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Amounts may be written as TOML
/// numbers or as strings; strings avoid any float parsing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ScramblerConfig {
    /// Fee deducted from the input total before splitting.
    #[serde(default = "default_fee")]
    pub fee: ExactAmount,

    /// Text file with one destination address per line.
    #[serde(default = "default_outputs_file")]
    pub outputs_file: PathBuf,

    /// JSON file with the list of spendable inputs.
    #[serde(default = "default_inputs_file")]
    pub inputs_file: PathBuf,

    /// Address receiving the change carve-out.
    #[serde(default = "default_change_address")]
    pub change_address: String,

    /// Smallest amount any randomized output may receive.
    #[serde(default = "default_min_output")]
    pub min_output: ExactAmount,

    /// Largest amount any randomized output may receive.
    #[serde(default = "default_max_output")]
    pub max_output: ExactAmount,

    /// Percentage (0..=100) of the distributable amount sent to change.
    #[serde(default)]
    pub change_percent: ExactAmount,

    /// Attempt budget for the random split.
    #[serde(default = "default_max_tries")]
    pub max_tries: usize,

    /// Whether to append each plan to `log_file`.
    #[serde(default)]
    pub log_enabled: bool,

    /// Transaction journal path.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Program named in the printed `createrawtransaction` command.
    #[serde(default = "default_cli_program")]
    pub cli_program: String,

    /// Diagnostic log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Diagnostic log filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_fee() -> ExactAmount {
    ExactAmount::from_units(100_000)
}

fn default_outputs_file() -> PathBuf {
    PathBuf::from("outputs.txt")
}

fn default_inputs_file() -> PathBuf {
    PathBuf::from("inputs.json")
}

fn default_change_address() -> String {
    "CHANGE_ADDRESS".to_string()
}

fn default_min_output() -> ExactAmount {
    ExactAmount::from_units(1_000_000)
}

fn default_max_output() -> ExactAmount {
    ExactAmount::from_units(999_999_999)
}

fn default_max_tries() -> usize {
    DEFAULT_MAX_TRIES
}

fn default_log_file() -> PathBuf {
    PathBuf::from("scrambler.log")
}

fn default_cli_program() -> String {
    "gridcoin-cli".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ScramblerConfig {
    fn default() -> Self {
        Self {
            fee: default_fee(),
            outputs_file: default_outputs_file(),
            inputs_file: default_inputs_file(),
            change_address: default_change_address(),
            min_output: default_min_output(),
            max_output: default_max_output(),
            change_percent: ExactAmount::ZERO,
            max_tries: default_max_tries(),
            log_enabled: false,
            log_file: default_log_file(),
            cli_program: default_cli_program(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ScramblerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ScramblerError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScramblerError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ScramblerError> {
        toml::from_str(s).map_err(|e| ScramblerError::Config(e.to_string()))
    }

    /// Load `path` if it exists. `Ok(None)` means there is no file and the
    /// caller should fall back to the defaults.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ScramblerError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::from_toml_file(path).map(Some)
    }

    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> Result<(), ScramblerError> {
        if self.min_output > self.max_output {
            return Err(ScramblerError::Config(format!(
                "min_output {} exceeds max_output {}",
                self.min_output, self.max_output
            )));
        }
        let hundred = ExactAmount::from_units(100 * scrambler_types::UNITS_PER_COIN);
        if self.change_percent > hundred {
            return Err(ScramblerError::Config(format!(
                "change_percent must be between 0 and 100, got {}",
                self.change_percent
            )));
        }
        if self.max_tries == 0 {
            return Err(ScramblerError::Config("max_tries must be at least 1".into()));
        }
        if self.change_address.trim().is_empty() {
            return Err(ScramblerError::Config("change_address must not be empty".into()));
        }
        Ok(())
    }

    /// The engine parameters this configuration describes.
    pub fn allocation_params(&self) -> AllocationParams {
        AllocationParams {
            fee: self.fee,
            bounds: Bounds::new(self.min_output, self.max_output),
            change_percent: self.change_percent,
            change_address: Destination::new(self.change_address.clone()),
            max_tries: self.max_tries,
        }
    }

    /// Write a commented configuration file holding these settings.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        let toml_data = format!(
            "# Scrambler configuration
# Fee deducted from the input total
fee = \"{}\"
# One destination address per line, '#' starts a comment line
outputs_file = {}
# JSON list of {{ txid, vout, amount }} objects
inputs_file = {}
# Receives the change carve-out
change_address = {}
# Bounds for every randomized output
min_output = \"{}\"
max_output = \"{}\"
# Share of the distributable amount sent to change (0-100)
change_percent = \"{}\"
# Attempts before giving up on a random split
max_tries = {}
# Append each transaction to log_file
log_enabled = {}
log_file = {}
# Program shown in the printed command line
cli_program = {}
# Diagnostics: human | json, and a tracing filter
log_format = \"{}\"
log_level = {}
",
            self.fee,
            toml_path(&self.outputs_file),
            toml_path(&self.inputs_file),
            toml_string(&self.change_address),
            self.min_output,
            self.max_output,
            self.change_percent,
            self.max_tries,
            self.log_enabled,
            toml_path(&self.log_file),
            toml_string(&self.cli_program),
            self.log_format,
            toml_string(&self.log_level),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        file.write_all(toml_data.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// `s` as a TOML string literal.
fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_owned()).to_string()
}

fn toml_path(path: &Path) -> String {
    toml_string(&path.display().to_string())
}
