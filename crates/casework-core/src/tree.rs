//! Rich document tree model.
//!
//! The tree uses the node vocabulary of a Tiptap/ProseMirror editor, so the
//! JSON produced here can be loaded straight into the editor and the JSON the
//! editor saves can be read back for normalization:
//!
//! ```json
//! {
//!   "type": "doc",
//!   "content": [
//!     { "type": "heading", "attrs": { "level": 2 }, "content": [
//!       { "type": "text", "text": "Results" }
//!     ]},
//!     { "type": "paragraph", "content": [
//!       { "type": "text", "text": "Twice", "marks": [{ "type": "bold" }] },
//!       { "type": "text", "text": " as fast." }
//!     ]}
//!   ]
//! }
//! ```
//!
//! Every type here is a plain value. Nothing in this crate or in
//! `casework-content` mutates a tree in place; transformations take `&Document`
//! and return a new one.

use serde::{Deserialize, Serialize};

/// Root node of a rich document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "doc")]
pub struct Document {
    /// Top-level blocks, in document order.
    #[serde(default)]
    pub content: Vec<Block>,
}

impl Document {
    /// Create a document from its top-level blocks.
    pub fn new(content: Vec<Block>) -> Self {
        Self { content }
    }

    /// Plain text of the whole document, one line per block.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(Block::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// `#` through `######` headings.
    Heading {
        /// Heading attributes.
        attrs: HeadingAttrs,
        /// Inline content.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Text>,
    },

    /// A run of prose.
    Paragraph {
        /// Inline content. Empty for an empty paragraph.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Text>,
    },

    /// Unordered list.
    BulletList {
        /// List items.
        #[serde(default)]
        content: Vec<ListItem>,
    },

    /// Ordered list. Source numbering is not preserved.
    OrderedList {
        /// List items.
        #[serde(default)]
        content: Vec<ListItem>,
    },

    /// Quoted block.
    Blockquote {
        /// Quoted blocks; the compiler emits a single paragraph.
        #[serde(default)]
        content: Vec<Block>,
    },

    /// Preformatted code. Its text is never scanned for marks.
    CodeBlock {
        /// Code block attributes.
        #[serde(default)]
        attrs: CodeBlockAttrs,
        /// Raw code as unmarked text.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Text>,
    },

    /// Thematic break.
    HorizontalRule,
}

impl Block {
    /// Create a paragraph block.
    pub fn paragraph(content: Vec<Text>) -> Self {
        Self::Paragraph { content }
    }

    /// Create a heading block. `level` is clamped to `1..=6`.
    pub fn heading(level: u8, content: Vec<Text>) -> Self {
        Self::Heading {
            attrs: HeadingAttrs::new(level),
            content,
        }
    }

    /// Create a code block holding `code` verbatim.
    pub fn code_block(language: Option<String>, code: &str) -> Self {
        let content = if code.is_empty() {
            Vec::new()
        } else {
            vec![Text::plain(code)]
        };
        Self::CodeBlock {
            attrs: CodeBlockAttrs { language },
            content,
        }
    }

    /// The node's `type` name as it appears in JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Heading { .. } => "heading",
            Self::Paragraph { .. } => "paragraph",
            Self::BulletList { .. } => "bulletList",
            Self::OrderedList { .. } => "orderedList",
            Self::Blockquote { .. } => "blockquote",
            Self::CodeBlock { .. } => "codeBlock",
            Self::HorizontalRule => "horizontalRule",
        }
    }

    /// Concatenated text of this block with marks discarded.
    ///
    /// Nested blocks (list items, quotes) are joined with newlines.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Heading { content, .. }
            | Self::Paragraph { content }
            | Self::CodeBlock { content, .. } => inline_text(content),
            Self::BulletList { content } | Self::OrderedList { content } => content
                .iter()
                .map(ListItem::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Blockquote { content } => content
                .iter()
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::HorizontalRule => String::new(),
        }
    }
}

/// Concatenate the text of inline nodes, dropping marks.
pub fn inline_text(content: &[Text]) -> String {
    content.iter().map(|node| node.text.as_str()).collect()
}

/// Heading attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    /// Heading level, `1..=6`.
    pub level: u8,
}

impl HeadingAttrs {
    /// Create heading attributes, clamping `level` to `1..=6`.
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(1, 6),
        }
    }
}

/// Code block attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    /// Language from the fence info string, if any.
    #[serde(default)]
    pub language: Option<String>,
}

/// One entry of a bullet or ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "listItem")]
pub struct ListItem {
    /// Item blocks; the compiler emits a single paragraph.
    #[serde(default)]
    pub content: Vec<Block>,
}

impl ListItem {
    /// Create a list item holding a single paragraph.
    pub fn paragraph(content: Vec<Text>) -> Self {
        Self {
            content: vec![Block::paragraph(content)],
        }
    }

    fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Inline text leaf with the marks that apply to all of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "text")]
pub struct Text {
    /// Text content, without markdown delimiters.
    pub text: String,
    /// Marks applied simultaneously to the whole text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl Text {
    /// Unmarked text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Text carrying `marks`.
    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// Whether no mark applies to this text.
    pub fn is_plain(&self) -> bool {
        self.marks.is_empty()
    }

    /// Whether `mark` applies to this text.
    pub fn has_mark(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }

    /// Link target, if a link mark applies.
    pub fn href(&self) -> Option<&str> {
        self.marks.iter().find_map(|mark| match mark {
            Mark::Link { attrs } => Some(attrs.href.as_str()),
            _ => None,
        })
    }
}

/// Inline formatting mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    /// `**bold**`
    Bold,
    /// `*italic*`
    Italic,
    /// `~~strike~~`
    Strike,
    /// `` `code` ``
    Code,
    /// `[text](href)`
    Link {
        /// Link attributes.
        attrs: LinkAttrs,
    },
}

impl Mark {
    /// Create a link mark.
    pub fn link(href: impl Into<String>) -> Self {
        Self::Link {
            attrs: LinkAttrs { href: href.into() },
        }
    }
}

/// Link attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkAttrs {
    /// Link target.
    pub href: String,
}
