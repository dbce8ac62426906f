//! Append-only transaction journal.
//!
//! Each entry is a local-time timestamp in brackets followed by the
//! pretty-printed plan: `[2024-05-01 12:00:00] { ... }`.

use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use scrambler_types::TransactionPlan;

use crate::ScramblerError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A journal file that plans are appended to.
#[derive(Clone, Debug)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `plan` stamped with the current local time.
    pub fn append(&self, plan: &TransactionPlan) -> Result<(), ScramblerError> {
        self.append_at(Local::now().naive_local(), plan)
    }

    /// Append `plan` stamped with `at`.
    pub fn append_at(&self, at: NaiveDateTime, plan: &TransactionPlan) -> Result<(), ScramblerError> {
        let entry = format_entry(at, plan)?;
        let journal_err = |source: std::io::Error| ScramblerError::Journal {
            path: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(journal_err)?;
        file.write_all(entry.as_bytes()).map_err(journal_err)?;
        file.flush().map_err(journal_err)?;

        tracing::info!("transaction logged to {}", self.path.display());
        Ok(())
    }
}

/// Render one journal entry, trailing newline included.
pub fn format_entry(at: NaiveDateTime, plan: &TransactionPlan) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string_pretty(plan)?;
    Ok(format!("[{}] {}\n", at.format(TIMESTAMP_FORMAT), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scrambler_types::{InputRef, OutputMap};

    fn sample_plan() -> TransactionPlan {
        let mut outputs = OutputMap::new();
        outputs.insert("S1".into(), "1.5".parse().unwrap());
        TransactionPlan {
            inputs: vec![InputRef {
                txid: "ff".into(),
                vout: 2,
            }],
            outputs,
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn entry_has_timestamp_prefix() {
        let entry = format_entry(noon(), &sample_plan()).unwrap();
        assert!(entry.starts_with("[2024-05-01 12:00:00] {\n"));
        assert!(entry.ends_with("}\n"));
        assert!(entry.contains("\"S1\": 1.5"));
    }

    #[test]
    fn entries_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("scrambler.log"));
        journal.append_at(noon(), &sample_plan()).unwrap();
        journal.append_at(noon(), &sample_plan()).unwrap();

        let contents = std::fs::read_to_string(journal.path()).unwrap();
        assert_eq!(contents.matches("[2024-05-01 12:00:00]").count(), 2);
    }

    #[test]
    fn unwritable_path_is_a_journal_error() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("missing").join("scrambler.log"));
        let err = journal.append(&sample_plan()).unwrap_err();
        assert!(matches!(err, ScramblerError::Journal { .. }));
    }
}
