//! scrambler — splits a pool of inputs across destination addresses in
//! random, bounded amounts and prints the resulting raw transaction.

use anyhow::Context;
use clap::Parser;
use scrambler_types::ExactAmount;
use scrambler_utils::LogFormat;
use scrambler_wallet::{
    create_raw_transaction_command, prepare_plan, raw_transaction_json, Journal, ScramblerConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrambler", about = "Random amount splitter for raw transactions")]
struct Cli {
    /// Path to the TOML configuration file. Missing files fall back to
    /// built-in defaults; flags and env vars override file settings.
    #[arg(long, default_value = "scrambler.toml", env = "SCRAMBLER_CONFIG")]
    config: PathBuf,

    /// Fee deducted from the input total.
    #[arg(long, env = "SCRAMBLER_FEE")]
    fee: Option<ExactAmount>,

    /// Smallest amount per randomized output.
    #[arg(long, env = "SCRAMBLER_MIN_OUTPUT")]
    min_output: Option<ExactAmount>,

    /// Largest amount per randomized output.
    #[arg(long, env = "SCRAMBLER_MAX_OUTPUT")]
    max_output: Option<ExactAmount>,

    /// Percentage (0-100) of the distributable amount sent to change.
    #[arg(long, env = "SCRAMBLER_CHANGE_PERCENT")]
    change_percent: Option<ExactAmount>,

    /// Address receiving the change.
    #[arg(long, env = "SCRAMBLER_CHANGE_ADDRESS")]
    change_address: Option<String>,

    /// Destination address list (one per line).
    #[arg(long, env = "SCRAMBLER_OUTPUTS_FILE")]
    outputs_file: Option<PathBuf>,

    /// Spendable inputs (JSON list).
    #[arg(long, env = "SCRAMBLER_INPUTS_FILE")]
    inputs_file: Option<PathBuf>,

    /// Attempts before giving up on a random split.
    #[arg(long, env = "SCRAMBLER_MAX_TRIES")]
    max_tries: Option<usize>,

    /// Append the transaction to the journal file.
    #[arg(long, env = "SCRAMBLER_LOG_ENABLED")]
    log: bool,

    /// Journal file path.
    #[arg(long, env = "SCRAMBLER_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Diagnostic log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SCRAMBLER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Diagnostic log format: "human" or "json".
    #[arg(long, env = "SCRAMBLER_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand (defaults to `plan`).
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build a transaction and print it with its createrawtransaction command.
    Plan,
    /// Write a configuration file with the effective settings.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Overlay command-line settings on top of `base`.
    fn apply(&self, base: ScramblerConfig) -> ScramblerConfig {
        ScramblerConfig {
            fee: self.fee.unwrap_or(base.fee),
            min_output: self.min_output.unwrap_or(base.min_output),
            max_output: self.max_output.unwrap_or(base.max_output),
            change_percent: self.change_percent.unwrap_or(base.change_percent),
            change_address: self.change_address.clone().unwrap_or(base.change_address),
            outputs_file: self.outputs_file.clone().unwrap_or(base.outputs_file),
            inputs_file: self.inputs_file.clone().unwrap_or(base.inputs_file),
            max_tries: self.max_tries.unwrap_or(base.max_tries),
            log_enabled: self.log || base.log_enabled,
            log_file: self.log_file.clone().unwrap_or(base.log_file),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_format: self.log_format.unwrap_or(base.log_format),
            ..base
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging settings may come from the file, so read it before the
    // subscriber exists and report how it went afterwards.
    let file_config = ScramblerConfig::load_optional(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let config_found = file_config.is_some();
    let config = cli.apply(file_config.unwrap_or_default());

    scrambler_utils::init_logging(config.log_format, &config.log_level);
    if config_found {
        tracing::info!("loaded config from {}", cli.config.display());
    } else {
        tracing::warn!("config file {} not found, using defaults", cli.config.display());
    }

    match cli.command.unwrap_or(Command::Plan) {
        Command::Plan => run_plan(&config),
        Command::InitConfig { force } => {
            if config_found && !force {
                anyhow::bail!(
                    "{} already exists, pass --force to overwrite",
                    cli.config.display()
                );
            }
            config
                .write_to_file(&cli.config)
                .with_context(|| format!("failed to write {}", cli.config.display()))?;
            println!("Wrote configuration to {}", cli.config.display());
            Ok(())
        }
    }
}

fn run_plan(config: &ScramblerConfig) -> anyhow::Result<()> {
    let plan = prepare_plan(config)?;

    if config.log_enabled {
        // The plan is still valid without a journal entry.
        if let Err(e) = Journal::new(&config.log_file).append(&plan) {
            tracing::error!("{e}");
        }
    }

    println!("\n=== RAW TRANSACTION ===");
    println!("{}", raw_transaction_json(&plan)?);
    println!("\nTo broadcast your transaction, use the following CLI command:");
    println!(
        "{}",
        create_raw_transaction_command(&config.cli_program, &plan)?
    );
    Ok(())
}
