//! JSONL audit log: append-only line-delimited JSON for the sweep's
//! destructive actions.
//!
//! Each line is a self-contained JSON object. Lines are assembled in memory
//! and written via a single `write_all` to prevent interleaved partial lines
//! when the file is being tailed.
//!
//! Degradation chain: primary file path → stderr with `[FSW-JSONL]` prefix
//! → silent discard. A sweep must never fail because its audit log can't be
//! written.

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{FswError, Result};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// Log event types matching the sweep activity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SweepStart,
    FileDeleted,
    FileModified,
    FileError,
    SweepComplete,
}

/// A single JSONL log entry — all fields optional except `ts`, `event`,
/// `severity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    /// Event type identifier.
    pub event: EventType,
    /// Severity level.
    pub severity: Severity,
    /// Affected filesystem path (when applicable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the action actually mutated storage (false in dry-run).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
    /// FSW error code if the action failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Human-readable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Files visited (sweep_complete).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_seen: Option<usize>,
    /// Files deleted (sweep_complete).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<usize>,
    /// Files rewritten (sweep_complete).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<usize>,
    /// Per-file faults (sweep_complete).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<usize>,
    /// Sweep duration in milliseconds (sweep_complete).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Freeform details (e.g. config hash on sweep_start).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            severity,
            path: None,
            applied: None,
            error_code: None,
            error_message: None,
            files_seen: None,
            deleted: None,
            modified: None,
            errors: None,
            duration_ms: None,
            details: None,
        }
    }
}

/// Degradation state of the JSONL writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    /// Writing to the configured path.
    Normal,
    /// File failed, writing to stderr.
    Stderr,
    /// Everything failed, silently discarding.
    Discard,
}

/// Configuration for the JSONL writer.
#[derive(Debug, Clone)]
pub struct JsonlConfig {
    /// Log file path.
    pub path: PathBuf,
}

/// Append-only JSONL log writer with stderr fallback.
pub struct JsonlWriter {
    writer: Option<BufWriter<File>>,
    state: WriterState,
}

impl JsonlWriter {
    /// Open the JSONL log file. Falls through the degradation chain on
    /// failure.
    pub fn open(config: &JsonlConfig) -> Self {
        match open_append(&config.path) {
            Ok(file) => Self {
                writer: Some(BufWriter::with_capacity(64 * 1024, file)),
                state: WriterState::Normal,
            },
            Err(_) => {
                let _ = writeln!(
                    io::stderr(),
                    "[FSW-JSONL] log path failed, using stderr: {}",
                    config.path.display()
                );
                Self {
                    writer: None,
                    state: WriterState::Stderr,
                }
            }
        }
    }

    /// Write a single log entry as one atomic JSONL line.
    pub fn write_entry(&mut self, entry: &LogEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                let _ = writeln!(io::stderr(), "[FSW-JSONL] serialize error: {e}");
                return;
            }
        };
        self.write_line(&line);
    }

    /// Flush buffers.
    pub fn flush(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            let _ = w.flush();
        }
    }

    /// Current degradation state.
    pub fn state(&self) -> &str {
        match self.state {
            WriterState::Normal => "normal",
            WriterState::Stderr => "stderr",
            WriterState::Discard => "discard",
        }
    }

    fn write_line(&mut self, line: &str) {
        match self.state {
            WriterState::Normal => {
                let failed = match self.writer.as_mut() {
                    Some(w) => w.write_all(line.as_bytes()).is_err(),
                    None => true,
                };
                if failed {
                    self.writer = None;
                    self.state = WriterState::Stderr;
                    let _ =
                        writeln!(io::stderr(), "[FSW-JSONL] log write failed, using stderr");
                    self.write_line(line);
                }
            }
            WriterState::Stderr => {
                if write!(io::stderr(), "[FSW-JSONL] {line}").is_err() {
                    self.state = WriterState::Discard;
                }
            }
            WriterState::Discard => {
                // Silently drop.
            }
        }
    }
}

/// Open or create a file for appending.
fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FswError::io(parent, source))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| FswError::io(path, source))
}

/// Format current UTC time as ISO 8601.
fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
