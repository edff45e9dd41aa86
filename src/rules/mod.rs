//! Decision tables: flair denylist, rename rules, noise-field defaults.

pub mod denylist;
pub mod noise;
pub mod rename;
