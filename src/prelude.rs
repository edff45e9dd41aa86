//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use flair_sweep::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{FswError, Result};

// Record model
pub use crate::record::PostRecord;

// Rules
pub use crate::rules::denylist::Denylist;
pub use crate::rules::noise::NoiseFieldTable;
pub use crate::rules::rename::{RenameRule, RenameTable};

// Sweep
pub use crate::sweep::processor::{FlairDecision, RecordProcessor, SweepRunner};
pub use crate::sweep::report::{FileOutcome, ModContentEntry, SweepReport};
pub use crate::sweep::walker::{JsonFileWalker, WalkerConfig};
