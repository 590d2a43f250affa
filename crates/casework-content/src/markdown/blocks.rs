//! Block segmentation: markdown-flavored text to document blocks.
//!
//! Input is processed line by line. Each line is trimmed and classified by the
//! first matching rule below; contiguous lines of the same kind are grouped
//! into one block.
//!
//! | Rule | Line | Block | Grouping |
//! |---|---|---|---|
//! | 1 | `` ``` ``, optional info string without backticks | code block | raw lines until the closing fence |
//! | 2 | `---`, `***`, `___` (3 or more) | horizontal rule | single line |
//! | 3 | `# ` through `###### ` | heading | single line |
//! | 4 | `> ` | blockquote | consecutive lines joined with a space |
//! | 5 | `- ` or `* ` | bullet list | one item per line |
//! | 6 | `1. ` | ordered list | one item per line, numbers discarded |
//! | 7 | anything else | paragraph | consecutive lines joined with a space |
//!
//! Blank lines end the current group. A marker without following text (a bare
//! `-` or `1.`) is paragraph text.
//!
//! # Example
//!
//! ```rust
//! use casework_content::markdown::blocks::compile_blocks;
//! use casework_core::{Block, ListItem, Text};
//!
//! let blocks = compile_blocks("# Goals\n- faster\n- cheaper");
//! assert_eq!(blocks, vec![
//!     Block::heading(1, vec![Text::plain("Goals")]),
//!     Block::BulletList { content: vec![
//!         ListItem::paragraph(vec![Text::plain("faster")]),
//!         ListItem::paragraph(vec![Text::plain("cheaper")]),
//!     ]},
//! ]);
//! ```

use std::sync::LazyLock;

use casework_core::{Block, Document, ListItem};
use regex::Regex;

use super::inline::parse_inline;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("Invalid heading regex"));

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+(.+)$").expect("Invalid bullet regex"));

static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.+)$").expect("Invalid ordered list regex"));

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").expect("Invalid rule regex"));

const FENCE: &str = "```";
const QUOTE_PREFIX: &str = "> ";

/// Classification of one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Fence(&'a str),
    Rule,
    Heading(u8, &'a str),
    Quote(&'a str),
    Bullet(&'a str),
    Ordered(&'a str),
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Self::Blank;
        }
        if let Some(info) = line.strip_prefix(FENCE).map(|rest| rest.trim_start_matches('`')) {
            // Backticks after the info string mean an inline span, not a fence.
            if !info.contains('`') {
                return Self::Fence(info.trim());
            }
        }
        if RULE_RE.is_match(line) {
            return Self::Rule;
        }
        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps[1].len() as u8;
            let text = caps.get(2).map_or("", |m| m.as_str());
            return Self::Heading(level, text.trim());
        }
        if let Some(text) = line.strip_prefix(QUOTE_PREFIX) {
            return Self::Quote(text.trim());
        }
        if let Some(item) = BULLET_RE.captures(line).and_then(|caps| caps.get(1)) {
            return Self::Bullet(item.as_str().trim());
        }
        if let Some(item) = ORDERED_RE.captures(line).and_then(|caps| caps.get(1)) {
            return Self::Ordered(item.as_str().trim());
        }
        Self::Text(line)
    }

    /// Heading, quote, and list lines; the kinds that promote a pasted
    /// paragraph to real blocks during normalization.
    fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Heading(..) | Self::Quote(_) | Self::Bullet(_) | Self::Ordered(_)
        )
    }
}

/// Whether any line of `text` is a heading, blockquote, or list line.
///
/// ```rust
/// use casework_content::markdown::blocks::has_block_syntax;
///
/// assert!(has_block_syntax("intro\n## Details"));
/// assert!(has_block_syntax("1. first"));
/// assert!(!has_block_syntax("just - a sentence"));
/// ```
pub fn has_block_syntax(text: &str) -> bool {
    text.lines().any(|line| Line::classify(line).is_structural())
}

/// Segment markdown text into blocks.
///
/// Never fails and never returns an empty list: input with no content yields
/// a single empty paragraph.
pub fn compile_blocks(text: &str) -> Vec<Block> {
    let lines: Vec<Line<'_>> = text.lines().map(Line::classify).collect();
    let raw: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match &lines[i] {
            Line::Blank => {
                i += 1;
            }
            Line::Fence(info) => {
                let language = (!info.is_empty()).then(|| info.to_string());
                let start = i + 1;
                let end = (start..lines.len())
                    .find(|&j| is_closing_fence(raw[j]))
                    .unwrap_or(lines.len());
                if end == lines.len() {
                    log::debug!("Unclosed code fence at line {}; running to end of text", i + 1);
                }
                let code = raw[start..end].join("\n");
                blocks.push(Block::code_block(language, &code));
                i = end + 1;
            }
            Line::Rule => {
                blocks.push(Block::HorizontalRule);
                i += 1;
            }
            Line::Heading(level, heading) => {
                blocks.push(Block::heading(*level, parse_inline(heading)));
                i += 1;
            }
            Line::Quote(_) => {
                let (parts, next) = take_run(&lines, i, |line| match line {
                    Line::Quote(text) => Some(*text),
                    _ => None,
                });
                blocks.push(Block::Blockquote {
                    content: vec![Block::paragraph(parse_inline(&parts.join(" ")))],
                });
                i = next;
            }
            Line::Bullet(_) => {
                let (items, next) = take_run(&lines, i, |line| match line {
                    Line::Bullet(text) => Some(*text),
                    _ => None,
                });
                blocks.push(Block::BulletList {
                    content: list_items(&items),
                });
                i = next;
            }
            Line::Ordered(_) => {
                let (items, next) = take_run(&lines, i, |line| match line {
                    Line::Ordered(text) => Some(*text),
                    _ => None,
                });
                blocks.push(Block::OrderedList {
                    content: list_items(&items),
                });
                i = next;
            }
            Line::Text(_) => {
                let (parts, next) = take_run(&lines, i, |line| match line {
                    Line::Text(text) => Some(*text),
                    _ => None,
                });
                blocks.push(Block::paragraph(parse_inline(&parts.join(" "))));
                i = next;
            }
        }
    }

    if blocks.is_empty() {
        blocks.push(Block::paragraph(Vec::new()));
    }
    blocks
}

/// Compile markdown text into a complete document.
///
/// ```rust
/// use casework_content::markdown::blocks::compile_document;
///
/// let doc = compile_document("Things were slow.");
/// assert_eq!(doc.content.len(), 1);
/// assert_eq!(doc.plain_text(), "Things were slow.");
/// ```
pub fn compile_document(text: &str) -> Document {
    Document::new(compile_blocks(text))
}

/// Collect the texts of consecutive lines accepted by `pick`, starting at
/// `start`. Returns the texts and the index of the first line not taken.
fn take_run<'a>(
    lines: &[Line<'a>],
    start: usize,
    pick: impl Fn(&Line<'a>) -> Option<&'a str>,
) -> (Vec<&'a str>, usize) {
    let mut parts = Vec::new();
    let mut i = start;
    while let Some(text) = lines.get(i).and_then(&pick) {
        parts.push(text);
        i += 1;
    }
    (parts, i)
}

fn list_items(items: &[&str]) -> Vec<ListItem> {
    items
        .iter()
        .map(|item| ListItem::paragraph(parse_inline(item)))
        .collect()
}

fn is_closing_fence(raw: &str) -> bool {
    let line = raw.trim();
    line.len() >= FENCE.len() && line.chars().all(|c| c == '`')
}

// ============================================================================
// Tests
// ============================================================================
