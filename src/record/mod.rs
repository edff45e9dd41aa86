//! Post record model: one JSON object bound to the file it was loaded from.
//!
//! Records are schemaless beyond a handful of recognized fields; everything
//! else passes through a rewrite untouched. Serialization matches the dump
//! format the archive tooling produced: 2-space indentation, non-ASCII
//! characters written literally.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::core::errors::{FswError, Result};
use crate::rules::noise::NoiseFieldTable;

/// Field holding the post's display tag.
pub const FLAIR_FIELD: &str = "link_flair_text";

const MOD_NOTE: &str = "mod_note";
const MOD_REASON_TITLE: &str = "mod_reason_title";
const MOD_REPORTS: &str = "mod_reports";

/// A single post record: the parsed JSON object plus its on-disk identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PostRecord {
    /// Read and parse one record file. The document must be a single JSON
    /// object; anything else is a record parse failure.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| FswError::io(path, source))?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| FswError::RecordParse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        match value {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            other => Err(FswError::RecordParse {
                path: path.to_path_buf(),
                details: format!("expected a top-level JSON object, got {}", json_kind(&other)),
            }),
        }
    }

    /// Build a record from already-parsed fields (fixtures, tests).
    #[must_use]
    pub fn from_fields(path: impl Into<PathBuf>, fields: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// The file this record was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All fields, in original key order.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The flair tag, when present and a string. Absent, `null`, and
    /// non-string values all read as "no flair" — such records are never
    /// deleted or rewritten.
    #[must_use]
    pub fn flair(&self) -> Option<&str> {
        self.fields.get(FLAIR_FIELD).and_then(Value::as_str)
    }

    /// Overwrite the flair tag in place, keeping the field's position.
    pub fn set_flair(&mut self, tag: &str) {
        self.fields
            .insert(FLAIR_FIELD.to_owned(), Value::String(tag.to_owned()));
    }

    /// Ordered moderation detail lines for the run report.
    ///
    /// A string field counts when its trimmed value is non-empty (the raw,
    /// untrimmed value is reported); `mod_reports` counts when it is a
    /// non-empty array (rendered as compact JSON). Empty means no entry.
    #[must_use]
    pub fn moderation_details(&self) -> Vec<String> {
        let mut details = Vec::new();

        for name in [MOD_NOTE, MOD_REASON_TITLE] {
            if let Some(raw) = self.fields.get(name).and_then(Value::as_str)
                && !raw.trim().is_empty()
            {
                details.push(format!("{name}: {raw}"));
            }
        }

        if let Some(reports) = self.fields.get(MOD_REPORTS).and_then(Value::as_array)
            && !reports.is_empty()
        {
            let rendered = serde_json::to_string(reports).unwrap_or_else(|_| "[...]".to_owned());
            details.push(format!("{MOD_REPORTS}: {rendered}"));
        }

        details
    }

    /// Drop noise fields sitting at their exact default value. Returns the
    /// names removed. Non-default values survive; relative order of the
    /// remaining fields is preserved.
    pub fn strip_default_noise(&mut self, table: &NoiseFieldTable) -> Vec<String> {
        let mut removed = Vec::new();
        let mut retained = Map::new();
        for (name, value) in std::mem::take(&mut self.fields) {
            if table.should_strip(&name, &value) {
                removed.push(name);
            } else {
                retained.insert(name, value);
            }
        }
        self.fields = retained;
        removed
    }

    /// Serialize in the dump format: 2-space indent, literal non-ASCII.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }

    /// Overwrite the record's file with its current fields.
    pub fn save(&self) -> Result<()> {
        let rendered = self.to_pretty_json()?;
        fs::write(&self.path, rendered).map_err(|source| FswError::io(&self.path, source))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
