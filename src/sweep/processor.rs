//! The record processor: per-file decision pipeline and the sweep runner.
//!
//! Pipeline per file, in fixed order:
//! 1. Load and parse (fault ⇒ skip file, record error, continue)
//! 2. Moderation-content detection — always before any mutation decision
//! 3. Flair extraction (absent/null ⇒ no-op)
//! 4. Deletion check — exact denylist match ⇒ remove file
//! 5. Rename check — first substring match wins ⇒ normalize flair
//! 6. Clean & persist — drop noise fields at exact defaults, rewrite
//!
//! A rename match always rewrites, even when the flair already equals the
//! replacement; a second sweep therefore rewrites identical bytes and
//! changes nothing.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::config::Config;
use crate::core::errors::{FswError, Result};
use crate::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};
use crate::record::PostRecord;
use crate::rules::denylist::Denylist;
use crate::rules::noise::NoiseFieldTable;
use crate::rules::rename::RenameTable;
use crate::sweep::report::{FileOutcome, ModContentEntry, SweepError, SweepReport};
use crate::sweep::walker::{JsonFileWalker, WalkerConfig};

/// Pure flair decision: what the rule tables say about one flair value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlairDecision {
    /// No deny entry, no rename rule: leave the record alone.
    Keep,
    /// Exact denylist hit: delete the post file.
    Delete,
    /// A rename rule matched: normalize the flair to this tag.
    Rename(String),
}

/// Per-file processing result handed back to the runner.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub outcome: FileOutcome,
    pub mod_details: Vec<String>,
}

/// Streaming notification emitted per affected file while a sweep runs.
#[derive(Debug, Clone, Copy)]
pub enum SweepEvent<'a> {
    Deleted { path: &'a Path, dry_run: bool },
    Modified { path: &'a Path, dry_run: bool },
    Failed { path: &'a Path, message: &'a str },
}

/// The record processor: owns the decision tables and applies the pipeline
/// to one file at a time.
pub struct RecordProcessor {
    denylist: Denylist,
    renames: RenameTable,
    noise: NoiseFieldTable,
    dry_run: bool,
}

impl RecordProcessor {
    #[must_use]
    pub fn new(denylist: Denylist, renames: RenameTable, dry_run: bool) -> Self {
        Self {
            denylist,
            renames,
            noise: NoiseFieldTable::default(),
            dry_run,
        }
    }

    /// Build a processor from the effective configuration.
    #[must_use]
    pub fn from_config(config: &Config, dry_run: bool) -> Self {
        Self::new(config.denylist(), config.rename_table(), dry_run)
    }

    /// Evaluate one flair value against the tables. Deny wins over rename:
    /// a flair that exact-matches a deny entry deletes even when a rename
    /// needle also occurs in it.
    #[must_use]
    pub fn decide(&self, flair: &str) -> FlairDecision {
        if self.denylist.matches(flair) {
            return FlairDecision::Delete;
        }
        match self.renames.resolve(flair) {
            Some(replacement) => FlairDecision::Rename(replacement.to_owned()),
            None => FlairDecision::Keep,
        }
    }

    /// Run the full pipeline for one file. Faults never escape; they are
    /// folded into the outcome so the sweep continues.
    #[must_use]
    pub fn process(&self, path: &Path) -> ProcessedFile {
        let mut record = match PostRecord::load(path) {
            Ok(record) => record,
            Err(err) => {
                return ProcessedFile {
                    path: path.to_path_buf(),
                    outcome: failed(&err),
                    mod_details: Vec::new(),
                };
            }
        };

        // Moderation detection runs before the deletion decision, so a
        // denylisted post still lands in the report — even if the mutation
        // itself faults afterwards.
        let mod_details = record.moderation_details();

        let outcome = self
            .apply(&mut record, path)
            .unwrap_or_else(|err| failed(&err));
        ProcessedFile {
            path: path.to_path_buf(),
            outcome,
            mod_details,
        }
    }

    fn apply(&self, record: &mut PostRecord, path: &Path) -> Result<FileOutcome> {
        let Some(flair) = record.flair().map(str::to_owned) else {
            return Ok(FileOutcome::Unchanged);
        };

        match self.decide(&flair) {
            FlairDecision::Keep => Ok(FileOutcome::Unchanged),
            FlairDecision::Delete => {
                if !self.dry_run {
                    fs::remove_file(path).map_err(|source| FswError::io(path, source))?;
                }
                Ok(FileOutcome::Deleted)
            }
            FlairDecision::Rename(tag) => {
                record.set_flair(&tag);
                record.strip_default_noise(&self.noise);
                if !self.dry_run {
                    record.save()?;
                }
                Ok(FileOutcome::Modified)
            }
        }
    }
}

fn failed(err: &FswError) -> FileOutcome {
    FileOutcome::Failed {
        code: err.code().to_string(),
        message: err.to_string(),
    }
}

/// Drives one sweep: discovery, per-file processing, report accumulation,
/// audit logging, and streaming observer notifications.
pub struct SweepRunner {
    processor: RecordProcessor,
    walker: JsonFileWalker,
    logger: Option<JsonlWriter>,
    observer: Option<Box<dyn Fn(&SweepEvent<'_>)>>,
    dry_run: bool,
    config_hash: Option<String>,
}

impl SweepRunner {
    /// Build a runner from the effective configuration. No logger and no
    /// observer are attached by default.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let dry_run = config.sweep.dry_run;
        Self {
            processor: RecordProcessor::from_config(config, dry_run),
            walker: JsonFileWalker::new(WalkerConfig {
                root: config.sweep.root_path.clone(),
                max_depth: config.sweep.max_depth,
                follow_symlinks: config.sweep.follow_symlinks,
            }),
            logger: None,
            observer: None,
            dry_run,
            config_hash: config.stable_hash().ok(),
        }
    }

    /// Attach a JSONL audit logger.
    #[must_use]
    pub fn with_logger(mut self, logger: JsonlWriter) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Attach a per-file observer, called for every delete/rewrite/fault.
    #[must_use]
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&SweepEvent<'_>) + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Run the sweep to completion and return the report. Only discovery
    /// failure of the root is fatal; per-file faults are folded into the
    /// report.
    pub fn run(&mut self) -> Result<SweepReport> {
        let start = Instant::now();
        let mut report = SweepReport::begin(self.dry_run);

        self.log(|hash| {
            let mut entry = LogEntry::new(EventType::SweepStart, Severity::Info);
            entry.details = hash.map(|h| format!("config_hash={h}"));
            entry
        });

        let files = self.walker.walk()?;
        report.files_seen = files.len();

        for path in &files {
            let processed = self.processor.process(path);

            if !processed.mod_details.is_empty() {
                report.mod_content.push(ModContentEntry {
                    path: processed.path.clone(),
                    details: processed.mod_details.clone(),
                });
            }

            match &processed.outcome {
                FileOutcome::Unchanged => {}
                FileOutcome::Deleted => {
                    report.deleted.push(processed.path.clone());
                    self.notify(&SweepEvent::Deleted {
                        path: &processed.path,
                        dry_run: self.dry_run,
                    });
                    let applied = !self.dry_run;
                    self.log(|_| {
                        let mut entry = LogEntry::new(EventType::FileDeleted, Severity::Info);
                        entry.path = Some(path.to_string_lossy().into_owned());
                        entry.applied = Some(applied);
                        entry
                    });
                }
                FileOutcome::Modified => {
                    report.modified.push(processed.path.clone());
                    self.notify(&SweepEvent::Modified {
                        path: &processed.path,
                        dry_run: self.dry_run,
                    });
                    let applied = !self.dry_run;
                    self.log(|_| {
                        let mut entry = LogEntry::new(EventType::FileModified, Severity::Info);
                        entry.path = Some(path.to_string_lossy().into_owned());
                        entry.applied = Some(applied);
                        entry
                    });
                }
                FileOutcome::Failed { code, message } => {
                    report.errors.push(SweepError {
                        path: processed.path.clone(),
                        code: code.clone(),
                        message: message.clone(),
                    });
                    self.notify(&SweepEvent::Failed {
                        path: &processed.path,
                        message,
                    });
                    self.log(|_| {
                        let mut entry = LogEntry::new(EventType::FileError, Severity::Warning);
                        entry.path = Some(path.to_string_lossy().into_owned());
                        entry.error_code = Some(code.clone());
                        entry.error_message = Some(message.clone());
                        entry
                    });
                }
            }
        }

        report.duration = start.elapsed();

        let counts = (
            report.files_seen,
            report.deleted.len(),
            report.modified.len(),
            report.errors.len(),
        );
        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = report.duration.as_millis() as u64;
        self.log(|_| {
            let mut entry = LogEntry::new(EventType::SweepComplete, Severity::Info);
            entry.files_seen = Some(counts.0);
            entry.deleted = Some(counts.1);
            entry.modified = Some(counts.2);
            entry.errors = Some(counts.3);
            entry.duration_ms = Some(duration_ms);
            entry
        });
        if let Some(logger) = self.logger.as_mut() {
            logger.flush();
        }

        Ok(report)
    }

    fn notify(&self, event: &SweepEvent<'_>) {
        if let Some(observer) = self.observer.as_ref() {
            observer(event);
        }
    }

    fn log<F>(&mut self, build: F)
    where
        F: FnOnce(Option<&str>) -> LogEntry,
    {
        if let Some(logger) = self.logger.as_mut() {
            let entry = build(self.config_hash.as_deref());
            logger.write_entry(&entry);
        }
    }
}
