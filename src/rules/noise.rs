//! Noise-field table: moderation fields safe to drop at their default value.
//!
//! The contract is remove-only-if-default: a noise field holding anything
//! other than its exact default survives a rewrite, even when the
//! moderation report just flagged it. Equality is full JSON-value equality,
//! not truthiness.

#![allow(missing_docs)]

use serde_json::{Value, json};

/// One noise field and the default value that makes it droppable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseField {
    pub name: &'static str,
    pub default: Value,
}

/// Per-field default-value table driving the cleaning step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseFieldTable {
    fields: Vec<NoiseField>,
}

impl Default for NoiseFieldTable {
    fn default() -> Self {
        Self {
            fields: vec![
                NoiseField {
                    name: "mod_note",
                    default: json!(""),
                },
                NoiseField {
                    name: "mod_reports",
                    default: json!([]),
                },
                NoiseField {
                    name: "mod_reason_title",
                    default: json!(""),
                },
                NoiseField {
                    name: "approved_at_utc",
                    default: Value::Null,
                },
            ],
        }
    }
}

impl NoiseFieldTable {
    /// Whether a present field should be dropped: it is a known noise field
    /// AND its value equals the field's default exactly.
    #[must_use]
    pub fn should_strip(&self, name: &str, value: &Value) -> bool {
        self.fields
            .iter()
            .any(|field| field.name == name && field.default == *value)
    }

    /// The table entries, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[NoiseField] {
        &self.fields
    }
}
