//! Casework Core: shared errors, the rich document tree, and utilities.
//!
//! This crate provides the foundational types used across all Casework
//! crates. It has no internal Casework dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`tree`]: Rich document tree (`doc` → blocks → text with marks)
//! - [`util`]: Slug utilities

#![forbid(unsafe_code)]

pub mod error;
pub mod tree;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result, ValidationError};
pub use tree::{Block, CodeBlockAttrs, Document, HeadingAttrs, LinkAttrs, ListItem, Mark, Text};

// Convenience re-exports from util
pub use util::ids::{is_normalized_slug, normalize_slug, slug_from_path};
