//! FSW-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, FswError>;

/// Top-level error type for Flair Sweep.
#[derive(Debug, Error)]
pub enum FswError {
    #[error("[FSW-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[FSW-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[FSW-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[FSW-2001] record parse failure for {path}: {details}")]
    RecordParse { path: PathBuf, details: String },

    #[error("[FSW-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[FSW-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FswError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "FSW-1001",
            Self::MissingConfig { .. } => "FSW-1002",
            Self::ConfigParse { .. } => "FSW-1003",
            Self::RecordParse { .. } => "FSW-2001",
            Self::Serialization { .. } => "FSW-2101",
            Self::Io { .. } => "FSW-3002",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for FswError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for FswError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
