//! Utility modules.
//!
//! - [`ids`]: Slug normalization and derivation

pub mod ids;
