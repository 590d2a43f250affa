//! Markdown-to-document compilation.
//!
//! This module converts the markdown subset used in case-study sections into
//! [`Document`](casework_core::Document) trees, and repairs editor documents
//! that still hold raw markdown:
//!
//! - [`blocks`]: Line-based block segmentation
//! - [`inline`]: Inline mark tokenizer
//! - [`normalize`]: Repair pass over existing trees
//!
//! Nothing here fails. Text the compiler cannot interpret as structure ends up
//! as plain paragraph text.
//!
//! # Example
//!
//! ```rust
//! use casework_content::markdown::{compile_document, normalize};
//!
//! let doc = compile_document("## Outcome\n\nWe cut costs by **30%**.");
//! assert_eq!(doc.content.len(), 2);
//!
//! // Nothing left for the repair pass to do.
//! assert_eq!(normalize(&doc), doc);
//! ```

pub mod blocks;
pub mod inline;
pub mod normalize;

#[cfg(test)]
mod proptests;

// Re-export key functions
pub use blocks::{compile_blocks, compile_document, has_block_syntax};
pub use inline::{contains_inline_syntax, parse_inline, to_markdown};
pub use normalize::{is_normalized, normalize};
