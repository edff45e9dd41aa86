//! Flair denylist: ordered set of tag values whose posts are deleted outright.
//!
//! Matching is exact — case-sensitive, full-string. A flair that merely
//! *contains* a deny entry survives; only byte-for-byte equality deletes.

/// Default deny entries, verbatim from the subreddit's moderation sheet.
/// Several carry emoji-style `:MARKER:` tags and double spaces — preserved
/// exactly, since matching is byte-for-byte.
fn builtin_entries() -> Vec<String> {
    [
        "Caliebre... mirame MIRAMEEEEEEEEEEE MIRAMEEEEEEEEEEEEEEEEEEEEEEE",
        "Clip",
        "INFORMACIÓN :travieso:",
        "PRIMER MEMITO",
        "ÚLTIMO POST PERDIDO",
        ":ICONOINFO:  INFORMACIÓN",
        ":ICONOPELI:  SPOILER DE ELDENRING",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// Ordered set of flair values that mark a post for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    entries: Vec<String>,
}

impl Default for Denylist {
    fn default() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }
}

impl Denylist {
    /// Build a denylist from explicit entries (e.g. from config).
    #[must_use]
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// The built-in entries, for config defaults.
    #[must_use]
    pub fn default_entries() -> Vec<String> {
        builtin_entries()
    }

    /// Exact-match query: case-sensitive, full-string.
    #[must_use]
    pub fn matches(&self, flair: &str) -> bool {
        self.entries.iter().any(|entry| entry == flair)
    }

    /// Deny entries in priority order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
