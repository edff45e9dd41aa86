//! Flair rename table: ordered (substring, replacement) pairs, first match wins.
//!
//! Matching is substring containment, case-sensitive. Earlier rules shadow
//! later ones: a flair containing both `ORO` and `DIAMANTE` normalizes to
//! `ORO`. Replacements are themselves stable under the table (each contains
//! its own needle or matches no needle), which is what makes a second sweep
//! a no-op.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// One rename rule: any flair containing `contains` becomes `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub contains: String,
    pub replacement: String,
}

impl RenameRule {
    #[must_use]
    pub fn new(contains: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            contains: contains.into(),
            replacement: replacement.into(),
        }
    }
}

fn builtin_rules() -> Vec<RenameRule> {
    vec![
        RenameRule::new("ORO", "ORO"),
        RenameRule::new("DIAMANTE", "DIAMANTE"),
        RenameRule::new("Meme Artesanal", "MEME_ARTESANAL"),
    ]
}

/// Ordered rename table evaluated first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTable {
    rules: Vec<RenameRule>,
}

impl Default for RenameTable {
    fn default() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }
}

impl RenameTable {
    /// Build a table from explicit rules (e.g. from config).
    #[must_use]
    pub fn from_rules(rules: Vec<RenameRule>) -> Self {
        Self { rules }
    }

    /// The built-in rules, for config defaults.
    #[must_use]
    pub fn default_rules() -> Vec<RenameRule> {
        builtin_rules()
    }

    /// Resolve a flair against the table. Returns the replacement of the
    /// first rule whose needle occurs in `flair`, or `None` when no rule
    /// matches (record stays as-is).
    #[must_use]
    pub fn resolve(&self, flair: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| flair.contains(&rule.contains))
            .map(|rule| rule.replacement.as_str())
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }
}
