//! Sequential recursive discovery of `*.json` files under one root.
//!
//! The walker only discovers; it never reads file contents. Discovery is
//! completed before any record is processed, so deletions and rewrites
//! cannot disturb the traversal and every file is visited exactly once.
//!
//! Safety invariants:
//! - Symlinked directories are not descended unless configured
//! - Bounded by `max_depth` to prevent runaway traversal
//! - Unreadable subtrees are skipped, never fatal

#![allow(missing_docs)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::errors::{FswError, Result};

/// Walker configuration derived from `SweepConfig`.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    pub root: PathBuf,
    pub max_depth: usize,
    pub follow_symlinks: bool,
}

/// Sequential `*.json` file walker.
pub struct JsonFileWalker {
    config: WalkerConfig,
}

impl JsonFileWalker {
    #[must_use]
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk the root and return every matching file, lexicographically
    /// sorted for deterministic processing order.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let meta =
            fs::metadata(&self.config.root).map_err(|err| FswError::io(&self.config.root, err))?;
        if !meta.is_dir() {
            return Err(FswError::io(
                &self.config.root,
                std::io::Error::new(ErrorKind::NotADirectory, "sweep root is not a directory"),
            ));
        }

        let mut found = Vec::new();
        self.walk_dir(&self.config.root, 0, &mut found);
        found.sort();
        Ok(found)
    }

    fn walk_dir(&self, dir: &Path, depth: usize, found: &mut Vec<PathBuf>) {
        if depth > self.config.max_depth {
            return;
        }

        // Unreadable directories are skipped; per-file faults are the
        // processor's concern, not the walker's.
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                self.walk_dir(&path, depth + 1, found);
            } else if file_type.is_symlink() {
                if self.config.follow_symlinks
                    && let Ok(target_meta) = fs::metadata(&path)
                {
                    if target_meta.is_dir() {
                        self.walk_dir(&path, depth + 1, found);
                    } else if is_json_file(&path) {
                        found.push(path);
                    }
                }
            } else if is_json_file(&path) {
                found.push(path);
            }
        }
    }
}

/// Match the `*.json` glob: a literal, case-sensitive `.json` suffix.
fn is_json_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}
