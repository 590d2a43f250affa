//! Repair pass for editor documents holding raw markdown.
//!
//! Authors paste markdown into the rich-text editor, so saved documents can
//! contain paragraphs like `"# Heading\nSome text"` or text leaves like
//! `"**bold**"`. [`normalize`] rewrites such documents into the structure the
//! compiler would have produced:
//!
//! - A paragraph whose source has a heading, blockquote, or list line is
//!   replaced by the blocks compiled from that source (one paragraph may
//!   become several siblings).
//! - Otherwise, each unmarked text leaf containing mark syntax is replaced by
//!   its parsed nodes. Leaves that already carry a mark keep their text as
//!   typed, literal `**` included.
//!
//! The input is never modified. Running the pass on its own output changes
//! nothing.

use casework_core::{Block, Document, ListItem, Text};

use super::blocks::{compile_blocks, has_block_syntax};
use super::inline::{contains_inline_syntax, parse_inline, to_markdown};

/// Normalize a document, returning a new tree.
///
/// # Example
///
/// ```rust
/// use casework_content::markdown::normalize::normalize;
/// use casework_core::{Block, Document, Text};
///
/// let pasted = Document::new(vec![Block::paragraph(vec![
///     Text::plain("# Heading\nSome text"),
/// ])]);
///
/// let doc = normalize(&pasted);
/// assert_eq!(doc.content, vec![
///     Block::heading(1, vec![Text::plain("Heading")]),
///     Block::paragraph(vec![Text::plain("Some text")]),
/// ]);
/// ```
pub fn normalize(doc: &Document) -> Document {
    Document::new(normalize_blocks(&doc.content))
}

/// Whether `doc` is already in normalized form.
pub fn is_normalized(doc: &Document) -> bool {
    normalize(doc) == *doc
}

fn normalize_blocks(blocks: &[Block]) -> Vec<Block> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        normalize_block_into(block, &mut out);
    }
    out
}

fn normalize_block_into(block: &Block, out: &mut Vec<Block>) {
    match block {
        Block::Paragraph { content } => {
            let source = to_markdown(content);
            if has_block_syntax(&source) {
                let promoted = compile_blocks(&source);
                log::debug!(
                    "Promoting paragraph with block syntax into {} block(s)",
                    promoted.len()
                );
                // Promoted lists and quotes hold shorter paragraphs that may
                // carry further markers ("- - x"), so they are normalized too.
                out.extend(normalize_blocks(&promoted));
            } else {
                out.push(Block::paragraph(repair_inline(content)));
            }
        }
        Block::BulletList { content } => out.push(Block::BulletList {
            content: normalize_items(content),
        }),
        Block::OrderedList { content } => out.push(Block::OrderedList {
            content: normalize_items(content),
        }),
        Block::Blockquote { content } => out.push(Block::Blockquote {
            content: normalize_blocks(content),
        }),
        Block::Heading { .. } | Block::CodeBlock { .. } | Block::HorizontalRule => {
            out.push(block.clone());
        }
    }
}

fn normalize_items(items: &[ListItem]) -> Vec<ListItem> {
    items
        .iter()
        .map(|item| ListItem {
            content: normalize_blocks(&item.content),
        })
        .collect()
}

/// Re-parse unmarked leaves that contain mark syntax.
fn repair_inline(content: &[Text]) -> Vec<Text> {
    let mut out = Vec::with_capacity(content.len());
    for node in content {
        if node.is_plain() && contains_inline_syntax(&node.text) {
            out.extend(parse_inline(&node.text));
        } else {
            out.push(node.clone());
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
