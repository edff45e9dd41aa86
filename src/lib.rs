#![forbid(unsafe_code)]

//! Flair Sweep (fsw) — batch cleanup for exported forum post JSON dumps.
//!
//! One pass over a directory tree of per-post JSON files:
//! 1. **Moderation report** — collect posts with populated moderation metadata
//! 2. **Denylist** — delete posts whose flair exact-matches a deny entry
//! 3. **Normalize** — rewrite flairs to canonical tags and strip noise fields
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use flair_sweep::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use flair_sweep::core::config::Config;
//! use flair_sweep::sweep::processor::SweepRunner;
//! ```

pub mod prelude;

pub mod core;
pub mod logger;
pub mod record;
pub mod rules;
pub mod sweep;
