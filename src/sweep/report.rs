//! Run report types: the explicit result of one sweep.
//!
//! The moderation-content collection and the outcome counters are carried
//! in the report value returned by the runner — there is no ambient state.

#![allow(missing_docs)]

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// No rename rule matched (or the record has no flair); file untouched.
    Unchanged,
    /// Flair exact-matched a deny entry; file removed from storage.
    Deleted,
    /// Flair normalized and noise cleaned; file rewritten in place.
    Modified,
    /// Per-file fault: the file was skipped and left exactly as found.
    Failed { code: String, message: String },
}

/// One moderation-content report entry, computed before any deletion or
/// rewrite decision for the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModContentEntry {
    pub path: PathBuf,
    pub details: Vec<String>,
}

/// A per-file fault record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepError {
    pub path: PathBuf,
    pub code: String,
    pub message: String,
}

/// Summary of one full sweep.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub dry_run: bool,
    pub files_seen: usize,
    pub deleted: Vec<PathBuf>,
    pub modified: Vec<PathBuf>,
    pub errors: Vec<SweepError>,
    pub mod_content: Vec<ModContentEntry>,
}

impl SweepReport {
    /// Start an empty report stamped with the current time.
    #[must_use]
    pub fn begin(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            duration: Duration::ZERO,
            dry_run,
            files_seen: 0,
            deleted: Vec::new(),
            modified: Vec::new(),
            errors: Vec::new(),
            mod_content: Vec::new(),
        }
    }

    /// Number of files left untouched (no fault, no mutation).
    #[must_use]
    pub fn files_unchanged(&self) -> usize {
        self.files_seen - self.deleted.len() - self.modified.len() - self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_count_balances_the_ledger() {
        let mut report = SweepReport::begin(false);
        report.files_seen = 5;
        report.deleted.push(PathBuf::from("a.json"));
        report.modified.push(PathBuf::from("b.json"));
        report.errors.push(SweepError {
            path: PathBuf::from("c.json"),
            code: "FSW-2001".to_string(),
            message: "bad".to_string(),
        });
        assert_eq!(report.files_unchanged(), 2);
    }

    #[test]
    fn begin_starts_empty() {
        let report = SweepReport::begin(true);
        assert!(report.dry_run);
        assert_eq!(report.files_seen, 0);
        assert!(report.mod_content.is_empty());
    }
}
