//! Inline mark tokenizer.
//!
//! Turns a single run of text into [`Text`] nodes carrying marks:
//!
//! | Syntax | Marks |
//! |---|---|
//! | `***x***` | bold + italic |
//! | `**x**` | bold |
//! | `*x*` | italic |
//! | `~~x~~` | strike |
//! | `` `x` `` | code |
//! | `[x](href)` | link |
//!
//! The tokenizer scans once, left to right. At each position the patterns are
//! tried in the order above and the first one matching at that position is
//! consumed whole; its content is taken literally, so spans never nest or
//! overlap. Characters that start no match accumulate into unmarked text.
//!
//! # Example
//!
//! ```rust
//! use casework_content::markdown::inline::parse_inline;
//! use casework_core::{Mark, Text};
//!
//! let nodes = parse_inline("a **bold** move");
//! assert_eq!(nodes, vec![
//!     Text::plain("a "),
//!     Text::marked("bold", vec![Mark::Bold]),
//!     Text::plain(" move"),
//! ]);
//! ```

use std::sync::LazyLock;

use casework_core::{Mark, Text};
use regex::Regex;

/// Mark patterns in priority order. Each source is unanchored; the tokenizer
/// anchors them at the current position.
const MARK_PATTERNS: &[(MarkKind, &str)] = &[
    (MarkKind::BoldItalic, r"\*\*\*([^\n]+?)\*\*\*"),
    (MarkKind::Bold, r"\*\*([^\n]+?)\*\*"),
    (MarkKind::Italic, r"\*([^*\n]+)\*"),
    (MarkKind::Strike, r"~~([^\n]+?)~~"),
    (MarkKind::Code, r"`([^`\n]+)`"),
    (MarkKind::Link, r"\[([^\]\n]+)\]\(([^)\n]+)\)"),
];

static ANCHORED: LazyLock<Vec<(MarkKind, Regex)>> = LazyLock::new(|| {
    MARK_PATTERNS
        .iter()
        .map(|(kind, source)| {
            let regex = Regex::new(&format!("^{source}")).expect("Invalid mark regex");
            (*kind, regex)
        })
        .collect()
});

static ANY_MARK: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = MARK_PATTERNS
        .iter()
        .map(|(_, source)| format!("(?:{source})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("Invalid combined mark regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkKind {
    BoldItalic,
    Bold,
    Italic,
    Strike,
    Code,
    Link,
}

impl MarkKind {
    fn marks(self, href: Option<&str>) -> Vec<Mark> {
        match self {
            Self::BoldItalic => vec![Mark::Bold, Mark::Italic],
            Self::Bold => vec![Mark::Bold],
            Self::Italic => vec![Mark::Italic],
            Self::Strike => vec![Mark::Strike],
            Self::Code => vec![Mark::Code],
            Self::Link => vec![Mark::link(href.unwrap_or_default())],
        }
    }
}

/// Characters that can open a mark.
fn opens_mark(c: char) -> bool {
    matches!(c, '*' | '~' | '`' | '[')
}

/// Try every pattern anchored at the start of `rest`.
///
/// Returns the node for the first match and the number of bytes it consumed.
fn match_at(rest: &str) -> Option<(Text, usize)> {
    ANCHORED.iter().find_map(|(kind, regex)| {
        let caps = regex.captures(rest)?;
        let whole = caps.get(0)?;
        let inner = caps.get(1)?.as_str();
        let href = caps.get(2).map(|m| m.as_str());
        Some((Text::marked(inner, kind.marks(href)), whole.end()))
    })
}

/// Parse inline mark syntax into text nodes.
///
/// Text without mark syntax comes back as a single unmarked node; an empty
/// string yields no nodes. Concatenating the returned texts gives back the
/// input with the delimiters of matched marks removed.
///
/// # Example
///
/// ```rust
/// use casework_content::markdown::inline::parse_inline;
/// use casework_core::{Mark, Text};
///
/// let nodes = parse_inline("see [docs](https://x.com)");
/// assert_eq!(nodes[1], Text::marked("docs", vec![Mark::link("https://x.com")]));
///
/// assert_eq!(parse_inline("plain"), vec![Text::plain("plain")]);
/// assert!(parse_inline("").is_empty());
/// ```
pub fn parse_inline(text: &str) -> Vec<Text> {
    let mut nodes = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        if opens_mark(c) {
            if let Some((node, consumed)) = match_at(&text[pos..]) {
                if plain_start < pos {
                    nodes.push(Text::plain(&text[plain_start..pos]));
                }
                nodes.push(node);
                pos += consumed;
                plain_start = pos;
                continue;
            }
        }
        pos += c.len_utf8();
    }

    if plain_start < text.len() {
        nodes.push(Text::plain(&text[plain_start..]));
    }
    nodes
}

/// Whether `text` contains any inline mark syntax.
///
/// A single combined-pattern test; it is true exactly when [`parse_inline`]
/// would return at least one marked node.
pub fn contains_inline_syntax(text: &str) -> bool {
    ANY_MARK.is_match(text)
}

/// Render text nodes back to markdown source.
///
/// Delimiters are re-inserted around marked nodes, so for any string `s`,
/// `to_markdown(&parse_inline(s)) == s`. Nodes carrying several marks from an
/// editor are wrapped code-innermost and link-outermost.
///
/// ```rust
/// use casework_content::markdown::inline::{parse_inline, to_markdown};
///
/// let source = "***both*** and ~~gone~~ or `x`";
/// assert_eq!(to_markdown(&parse_inline(source)), source);
/// ```
pub fn to_markdown(nodes: &[Text]) -> String {
    nodes.iter().map(node_to_markdown).collect()
}

fn node_to_markdown(node: &Text) -> String {
    if node.is_plain() {
        return node.text.clone();
    }

    let mut out = node.text.clone();
    if node.has_mark(&Mark::Code) {
        out = format!("`{out}`");
    }
    if node.has_mark(&Mark::Strike) {
        out = format!("~~{out}~~");
    }
    out = match (node.has_mark(&Mark::Bold), node.has_mark(&Mark::Italic)) {
        (true, true) => format!("***{out}***"),
        (true, false) => format!("**{out}**"),
        (false, true) => format!("*{out}*"),
        (false, false) => out,
    };
    if let Some(href) = node.href() {
        out = format!("[{out}]({href})");
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Single marks
    // ------------------------------------------------------------------------

    #[test]
    fn test_bold_italic() {
        assert_eq!(
            parse_inline("***wow***"),
            vec![Text::marked("wow", vec![Mark::Bold, Mark::Italic])]
        );
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            parse_inline("**Bold**"),
            vec![Text::marked("Bold", vec![Mark::Bold])]
        );
    }

    #[test]
    fn test_italic() {
        assert_eq!(
            parse_inline("an *aside*"),
            vec![Text::plain("an "), Text::marked("aside", vec![Mark::Italic])]
        );
    }

    #[test]
    fn test_strike() {
        assert_eq!(
            parse_inline("~~old~~ new"),
            vec![Text::marked("old", vec![Mark::Strike]), Text::plain(" new")]
        );
    }

    #[test]
    fn test_code() {
        assert_eq!(
            parse_inline("run `cargo fmt`"),
            vec![Text::plain("run "), Text::marked("cargo fmt", vec![Mark::Code])]
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            parse_inline("[home](https://example.com)"),
            vec![Text::marked("home", vec![Mark::link("https://example.com")])]
        );
    }

    // ------------------------------------------------------------------------
    // Mixed runs
    // ------------------------------------------------------------------------

    #[test]
    fn test_four_marks_in_order() {
        let nodes = parse_inline("**Bold** and *italic* and `code` and [link](https://x.com)");
        assert_eq!(
            nodes,
            vec![
                Text::marked("Bold", vec![Mark::Bold]),
                Text::plain(" and "),
                Text::marked("italic", vec![Mark::Italic]),
                Text::plain(" and "),
                Text::marked("code", vec![Mark::Code]),
                Text::plain(" and "),
                Text::marked("link", vec![Mark::link("https://x.com")]),
            ]
        );
    }

    #[test]
    fn test_earlier_span_wins_over_later_syntax() {
        // The code span claims the asterisks; no italic is produced.
        assert_eq!(
            parse_inline("`a*b*`"),
            vec![Text::marked("a*b*", vec![Mark::Code])]
        );
    }

    #[test]
    fn test_content_is_literal() {
        assert_eq!(
            parse_inline("**see [x](y)**"),
            vec![Text::marked("see [x](y)", vec![Mark::Bold])]
        );
    }

    #[test]
    fn test_bold_takes_priority_over_italic() {
        assert_eq!(
            parse_inline("**a** *b*"),
            vec![
                Text::marked("a", vec![Mark::Bold]),
                Text::plain(" "),
                Text::marked("b", vec![Mark::Italic]),
            ]
        );
    }

    // ------------------------------------------------------------------------
    // Unmatched syntax
    // ------------------------------------------------------------------------

    #[test]
    fn test_unclosed_delimiters_stay_plain() {
        for text in ["**open", "a * b", "~~half~", "`tick", "[label](", "[x]"] {
            assert_eq!(parse_inline(text), vec![Text::plain(text)], "input: {text}");
            assert!(!contains_inline_syntax(text), "input: {text}");
        }
    }

    #[test]
    fn test_empty_delimiters_stay_plain() {
        assert_eq!(parse_inline("****"), vec![Text::plain("****")]);
        assert_eq!(parse_inline("``"), vec![Text::plain("``")]);
    }

    #[test]
    fn test_marks_do_not_cross_newlines() {
        assert_eq!(parse_inline("*a\nb*"), vec![Text::plain("*a\nb*")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(
            parse_inline("très **bien** — ok"),
            vec![
                Text::plain("très "),
                Text::marked("bien", vec![Mark::Bold]),
                Text::plain(" — ok"),
            ]
        );
    }

    // ------------------------------------------------------------------------
    // contains_inline_syntax / to_markdown
    // ------------------------------------------------------------------------

    #[test]
    fn test_contains_inline_syntax() {
        assert!(contains_inline_syntax("a **b** c"));
        assert!(contains_inline_syntax("[a](b)"));
        assert!(!contains_inline_syntax("nothing here"));
    }

    #[test]
    fn test_to_markdown_editor_marks() {
        let node = Text::marked("x", vec![Mark::link("/y"), Mark::Bold]);
        assert_eq!(to_markdown(&[node]), "[**x**](/y)");

        let node = Text::marked("x", vec![Mark::Code, Mark::Strike]);
        assert_eq!(to_markdown(&[node]), "~~`x`~~");
    }

    #[test]
    fn test_to_markdown_reconstructs_source() {
        let source = "**Bold** and *italic* and `code` and [link](https://x.com)";
        assert_eq!(to_markdown(&parse_inline(source)), source);
    }
}
