//! Property-based tests for the markdown compiler.

#[allow(clippy::unwrap_used)]
mod tests {
    use crate::markdown::{
        compile_blocks, contains_inline_syntax, normalize, parse_inline, to_markdown,
    };
    use casework_core::{Block, Document, ListItem, Mark, Text};
    use proptest::prelude::*;

    /// Text biased toward markdown punctuation so that marks and block
    /// markers show up often.
    const MARKDOWN_ISH: &str = "[a-c #>*`~_\\[\\]()1.\\-\n]{0,24}";

    fn mark() -> impl Strategy<Value = Mark> {
        prop_oneof![
            Just(Mark::Bold),
            Just(Mark::Italic),
            Just(Mark::Strike),
            Just(Mark::Code),
            "[a-z/:.]{1,8}".prop_map(Mark::link),
        ]
    }

    fn text_node() -> impl Strategy<Value = Text> {
        (MARKDOWN_ISH, prop::collection::vec(mark(), 0..3))
            .prop_map(|(text, mut marks)| {
                marks.dedup();
                Text::marked(text, marks)
            })
    }

    fn paragraph() -> impl Strategy<Value = Block> {
        prop::collection::vec(text_node(), 0..4).prop_map(Block::paragraph)
    }

    fn block() -> impl Strategy<Value = Block> {
        prop_oneof![
            4 => paragraph(),
            1 => (1u8..=6, prop::collection::vec(text_node(), 0..3))
                .prop_map(|(level, content)| Block::heading(level, content)),
            1 => prop::collection::vec(paragraph(), 1..3).prop_map(|items| Block::BulletList {
                content: items.into_iter().map(|p| ListItem { content: vec![p] }).collect(),
            }),
            1 => prop::collection::vec(paragraph(), 1..3)
                .prop_map(|content| Block::Blockquote { content }),
            1 => Just(Block::HorizontalRule),
        ]
    }

    fn document() -> impl Strategy<Value = Document> {
        prop::collection::vec(block(), 0..5).prop_map(Document::new)
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(doc in document()) {
            let once = normalize(&doc);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn test_normalize_compiled_text_is_idempotent(text in MARKDOWN_ISH) {
            let once = normalize(&Document::new(compile_blocks(&text)));
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn test_plain_text_is_single_node(s in "[a-zA-Z0-9 ,.!?'-]{1,40}") {
            prop_assert_eq!(parse_inline(&s), vec![Text::plain(s.clone())]);
        }

        #[test]
        fn test_delimiters_reconstruct_input(s in "[a-c *~`\\[\\]()\n]{0,40}") {
            prop_assert_eq!(to_markdown(&parse_inline(&s)), s);
        }

        #[test]
        fn test_contains_syntax_agrees_with_tokenizer(s in "[a-c *~`\\[\\]()]{0,30}") {
            let marked = parse_inline(&s).iter().any(|node| !node.is_plain());
            prop_assert_eq!(contains_inline_syntax(&s), marked);
        }

        #[test]
        fn test_no_empty_plain_nodes(s in "[a-c *~`\\[\\]()]{0,30}") {
            prop_assert!(parse_inline(&s).iter().all(|node| !node.text.is_empty()));
        }

        #[test]
        fn test_compile_never_empty(text in MARKDOWN_ISH) {
            prop_assert!(!compile_blocks(&text).is_empty());
        }
    }
}
