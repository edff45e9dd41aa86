//! Configuration system: TOML file + env var overrides + built-in defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{FswError, Result};
use crate::rules::denylist::Denylist;
use crate::rules::rename::{RenameRule, RenameTable};

/// Full fsw configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub sweep: SweepConfig,
    pub rules: RulesConfig,
    pub paths: PathsConfig,
}

/// Sweep traversal and mutation knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SweepConfig {
    /// Root of the tree to sweep. Relative paths resolve against the
    /// working directory.
    pub root_path: PathBuf,
    pub max_depth: usize,
    pub follow_symlinks: bool,
    /// Evaluate everything, mutate nothing.
    pub dry_run: bool,
}

/// The decision tables, as explicit ordered configuration. Defaults are the
/// moderation sheet's literal values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RulesConfig {
    pub denylist: Vec<String>,
    pub renames: Vec<RenameRule>,
}

/// Filesystem paths used by fsw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    pub jsonl_log: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            max_depth: 64,
            follow_symlinks: false,
            dry_run: false,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            denylist: Denylist::default_entries(),
            renames: RenameTable::default_rules(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!(
                    "[FSW-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths"
                );
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        let cfg = home_dir.join(".config").join("fsw").join("config.toml");
        let data = home_dir.join(".local").join("share").join("fsw");
        Self {
            config_file: cfg,
            jsonl_log: data.join("sweep.jsonl"),
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from the default
    /// path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| FswError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(FswError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides()?;
        cfg.normalize_paths();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Deterministic hash of the effective config for log correlation.
    ///
    /// FNV-1a over the canonical JSON rendering — stable across processes
    /// and Rust releases, unlike `DefaultHasher`.
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        set_env_path("FSW_SWEEP_ROOT_PATH", &mut self.sweep.root_path);
        set_env_usize("FSW_SWEEP_MAX_DEPTH", &mut self.sweep.max_depth)?;
        set_env_bool("FSW_SWEEP_DRY_RUN", &mut self.sweep.dry_run)?;
        set_env_bool("FSW_SWEEP_FOLLOW_SYMLINKS", &mut self.sweep.follow_symlinks)?;
        set_env_path("FSW_JSONL_LOG", &mut self.paths.jsonl_log);
        Ok(())
    }

    fn normalize_paths(&mut self) {
        for path in [&mut self.sweep.root_path, &mut self.paths.jsonl_log] {
            let s = path.to_string_lossy().to_string();
            if s.len() > 1
                && let Some(stripped) = s.strip_suffix('/')
            {
                *path = PathBuf::from(stripped);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.sweep.max_depth == 0 {
            return Err(FswError::InvalidConfig {
                details: "sweep.max_depth must be >= 1".to_string(),
            });
        }

        if self.rules.denylist.iter().any(String::is_empty) {
            return Err(FswError::InvalidConfig {
                details: "rules.denylist entries must be non-empty".to_string(),
            });
        }

        let mut seen_needles: Vec<&str> = Vec::new();
        for rule in &self.rules.renames {
            if rule.contains.is_empty() {
                return Err(FswError::InvalidConfig {
                    details: "rules.renames contains-needles must be non-empty".to_string(),
                });
            }
            if rule.replacement.is_empty() {
                return Err(FswError::InvalidConfig {
                    details: format!(
                        "rules.renames replacement for needle {:?} must be non-empty",
                        rule.contains
                    ),
                });
            }
            if seen_needles.contains(&rule.contains.as_str()) {
                return Err(FswError::InvalidConfig {
                    details: format!("rules.renames has duplicate needle {:?}", rule.contains),
                });
            }
            seen_needles.push(&rule.contains);
        }

        Ok(())
    }

    /// Effective denylist built from this config.
    #[must_use]
    pub fn denylist(&self) -> Denylist {
        Denylist::from_entries(self.rules.denylist.clone())
    }

    /// Effective rename table built from this config.
    #[must_use]
    pub fn rename_table(&self) -> RenameTable {
        RenameTable::from_rules(self.rules.renames.clone())
    }
}

fn set_env_path(name: &str, target: &mut PathBuf) {
    if let Some(value) = env::var_os(name) {
        *target = PathBuf::from(value);
    }
}

fn set_env_usize(name: &str, target: &mut usize) -> Result<()> {
    if let Ok(raw) = env::var(name) {
        *target = raw.parse().map_err(|_| FswError::InvalidConfig {
            details: format!("{name} must be an unsigned integer, got {raw:?}"),
        })?;
    }
    Ok(())
}

fn set_env_bool(name: &str, target: &mut bool) -> Result<()> {
    if let Ok(raw) = env::var(name) {
        *target = match raw.as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(FswError::InvalidConfig {
                    details: format!("{name} must be a boolean, got {raw:?}"),
                });
            }
        };
    }
    Ok(())
}
