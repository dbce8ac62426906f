//! End-to-end: config file, address list and input list on disk through to
//! a reconciled plan and a journal entry.

use std::path::Path;

use scrambler_engine::AllocationError;
use scrambler_types::ExactAmount;
use scrambler_wallet::{prepare_plan, Journal, ScramblerConfig, ScramblerError};

fn amt(s: &str) -> ExactAmount {
    s.parse().unwrap()
}

fn write_fixture(dir: &Path, addresses: &str, inputs: &str, extra: &str) -> ScramblerConfig {
    std::fs::write(dir.join("outputs.txt"), addresses).unwrap();
    std::fs::write(dir.join("inputs.json"), inputs).unwrap();
    let toml = format!(
        "outputs_file = {:?}\ninputs_file = {:?}\nlog_file = {:?}\nchange_address = \"S_change\"\n{extra}",
        dir.join("outputs.txt").display().to_string(),
        dir.join("inputs.json").display().to_string(),
        dir.join("scrambler.log").display().to_string(),
    );
    let path = dir.join("scrambler.toml");
    std::fs::write(&path, toml).unwrap();
    ScramblerConfig::from_toml_file(&path).unwrap()
}

const INPUTS: &str = r#"[
    {"txid": "aa", "vout": 0, "amount": 4.5},
    {"txid": "bb", "vout": 1, "amount": "5.5"}
]"#;

#[test]
fn plan_from_files_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(
        dir.path(),
        "# payout list\nS1\nS2\n\nS3\n",
        INPUTS,
        "change_percent = 10\n",
    );

    let plan = prepare_plan(&config).unwrap();
    assert_eq!(plan.inputs.len(), 2);
    assert_eq!(plan.inputs[1].txid, "bb");
    assert_eq!(plan.outputs.len(), 4);
    assert_eq!(plan.outputs.get(&"S_change".into()), Some(amt("0.9999")));
    assert_eq!(plan.outputs.total(), Some(amt("9.999")));
}

#[test]
fn journal_records_plan() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), "S1\nS2\n", INPUTS, "log_enabled = true\n");

    let plan = prepare_plan(&config).unwrap();
    Journal::new(&config.log_file).append(&plan).unwrap();

    let log = std::fs::read_to_string(&config.log_file).unwrap();
    assert!(log.starts_with('['));
    assert!(log.contains("\"inputs\""));
    assert!(log.contains("\"S1\""));
}

#[test]
fn comment_only_address_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), "# none yet\n", INPUTS, "");
    let err = prepare_plan(&config).unwrap_err();
    assert!(matches!(err, ScramblerError::NoAddresses(_)));
}

#[test]
fn fee_above_total_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), "S1\n", INPUTS, "fee = 10\n");
    let err = prepare_plan(&config).unwrap_err();
    assert!(matches!(
        err,
        ScramblerError::Allocation(AllocationError::InsufficientFunds { .. })
    ));
}

#[test]
fn invalid_config_fails_before_reading_files() {
    let config = ScramblerConfig {
        min_output: amt("5"),
        max_output: amt("1"),
        outputs_file: "/definitely/not/here".into(),
        ..Default::default()
    };
    let err = prepare_plan(&config).unwrap_err();
    assert!(matches!(err, ScramblerError::Config(_)));
}
