//! Frontmatter splitting and parsing.
//!
//! A case study opens with a `---` delimited block of flat `key: value`
//! fields. This is not a general YAML parser; it understands exactly:
//!
//! ```markdown
//! ---
//! # comments and blank lines are skipped
//! title: "Quoted or bare values"
//! technologies:
//!   - Rust
//!   - "PostgreSQL"
//! results:
//!   - label: "Speed"
//!     value: "2x"
//!     context: "monthly"
//! faqs:
//!   - question: "How long did it take?"
//!     answer: "Twelve weeks."
//! ---
//! ```
//!
//! Array items start at two spaces of indentation (`  - `), record sub-fields
//! at four. Which shape an array has is decided by
//! [`shape_of`](super::schema::shape_of).

use std::collections::BTreeMap;

use casework_core::{Error, Result};

use super::schema::{
    shape_of, Faq, FieldShape, FieldValue, Metadata, RecordFields, ResultMetric,
};

const DELIMITER: &str = "---";

/// Indentation at which record sub-fields start.
const FIELD_INDENT: usize = 4;

/// Split `content` into its frontmatter block and the body after it.
///
/// The first line must be `---` and a later line must close the block with
/// `---`; otherwise the document is rejected with
/// [`Error::MissingFrontmatter`].
///
/// # Example
///
/// ```rust
/// use casework_content::case_study::frontmatter::split_frontmatter;
///
/// let (block, body) = split_frontmatter("---\ntitle: Demo\n---\n## Problem\n").unwrap();
/// assert_eq!(block, "title: Demo\n");
/// assert_eq!(body, "## Problem\n");
///
/// assert!(split_frontmatter("title: Demo\n").is_err());
/// ```
pub fn split_frontmatter(content: &str) -> Result<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next().ok_or(Error::MissingFrontmatter)?;
    if opening.trim_end() != DELIMITER {
        return Err(Error::MissingFrontmatter);
    }

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let body_start = offset + line.len();
            return Ok((&content[block_start..offset], &content[body_start..]));
        }
        offset += line.len();
    }

    log::debug!("Frontmatter opening delimiter found but no closing delimiter");
    Err(Error::MissingFrontmatter)
}

/// Parse a frontmatter block into metadata.
///
/// Never fails: lines that fit none of the supported forms are skipped, and
/// record items missing a required sub-field are dropped.
///
/// # Example
///
/// ```rust
/// use casework_content::case_study::frontmatter::parse_frontmatter;
/// use casework_content::case_study::schema::ResultMetric;
///
/// let meta = parse_frontmatter(
///     "title: \"Demo\"\nresults:\n  - label: \"Speed\"\n    value: \"2x\"\n    context: \"monthly\"\n",
/// );
/// assert_eq!(meta.text("title"), Some("Demo"));
/// assert_eq!(meta.results(), &[ResultMetric {
///     label: "Speed".into(),
///     value: "2x".into(),
///     context: Some("monthly".into()),
/// }]);
/// ```
pub fn parse_frontmatter(block: &str) -> Metadata {
    let mut metadata = Metadata::new();
    let mut open: Option<OpenArray> = None;

    for (index, line) in block.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if !line.starts_with([' ', '\t']) {
            if let Some(array) = open.take() {
                array.finish(&mut metadata);
            }
            match split_key_value(trimmed) {
                Some((key, "")) => open = Some(OpenArray::new(key)),
                Some((key, value)) => {
                    metadata.insert(key, FieldValue::Text(unquote(value).to_string()));
                }
                None => log::debug!("Ignoring frontmatter line {line_no}: {trimmed}"),
            }
            continue;
        }

        match open.as_mut() {
            Some(array) => array.push_line(line, line_no),
            None => log::debug!("Ignoring indented frontmatter line {line_no} outside an array"),
        }
    }

    if let Some(array) = open.take() {
        array.finish(&mut metadata);
    }
    metadata
}

/// Split `key: value` (or `key:`) into its parts.
///
/// Keys are ASCII letters, digits, `_` and `-`. The colon must end the line or
/// be followed by whitespace, so `https://x` never reads as a key.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    let valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid_key || !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
        return None;
    }
    Some((key, rest.trim()))
}

/// Strip one pair of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ').count()
}

// ============================================================================
// Array accumulation
// ============================================================================

type Record = BTreeMap<String, String>;

/// An array field being filled line by line.
struct OpenArray {
    key: String,
    shape: FieldShape,
    strings: Vec<String>,
    records: Vec<Record>,
}

impl OpenArray {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            shape: shape_of(key),
            strings: Vec::new(),
            records: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str, line_no: usize) {
        let trimmed = line.trim();
        let item = trimmed
            .strip_prefix("- ")
            .or_else(|| (trimmed == "-").then_some(""));
        let indent = indentation(line);
        let layout = self.shape.record_fields();

        match (layout, item) {
            (None, Some(value)) if indent < FIELD_INDENT => {
                let value = unquote(value.trim());
                if value.is_empty() {
                    log::debug!("Skipping empty '{}' item on line {line_no}", self.key);
                } else {
                    self.strings.push(value.to_string());
                }
            }
            (Some(layout), Some(first_field)) if indent < FIELD_INDENT => {
                let mut record = Record::new();
                insert_field(&self.key, layout, &mut record, first_field.trim(), line_no);
                self.records.push(record);
            }
            (Some(layout), None) if indent >= FIELD_INDENT => {
                match self.records.last_mut() {
                    Some(record) => insert_field(&self.key, layout, record, trimmed, line_no),
                    None => log::debug!(
                        "Ignoring '{}' field on line {line_no} before any item",
                        self.key
                    ),
                }
            }
            _ => log::debug!(
                "Ignoring line {line_no} in '{}': unexpected indentation or form",
                self.key
            ),
        }
    }

    fn finish(self, metadata: &mut Metadata) {
        let value = match self.shape {
            FieldShape::Strings => FieldValue::List(self.strings),
            FieldShape::Results => FieldValue::Results(
                complete_records(&self.key, self.shape, self.records)
                    .map(|mut record| ResultMetric {
                        label: take(&mut record, "label"),
                        value: take(&mut record, "value"),
                        context: record.remove("context").filter(|c| !c.is_empty()),
                    })
                    .collect(),
            ),
            FieldShape::Faqs => FieldValue::Faqs(
                complete_records(&self.key, self.shape, self.records)
                    .map(|mut record| Faq {
                        question: take(&mut record, "question"),
                        answer: take(&mut record, "answer"),
                    })
                    .collect(),
            ),
        };
        metadata.insert(self.key, value);
    }
}

fn insert_field(
    array_key: &str,
    layout: RecordFields,
    record: &mut Record,
    field: &str,
    line_no: usize,
) {
    match split_key_value(field) {
        Some((name, value)) if layout.accepts(name) => {
            record.insert(name.to_string(), unquote(value).to_string());
        }
        Some((name, _)) => {
            log::debug!("Ignoring unknown '{array_key}' field '{name}' on line {line_no}");
        }
        None => log::debug!("Ignoring malformed '{array_key}' field on line {line_no}: {field}"),
    }
}

/// Records holding every required sub-field with a non-empty value.
fn complete_records(
    key: &str,
    shape: FieldShape,
    records: Vec<Record>,
) -> impl Iterator<Item = Record> + '_ {
    let required = shape.record_fields().map_or(&[][..], |fields| fields.required);
    records.into_iter().enumerate().filter_map(move |(index, record)| {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|field| record.get(*field).is_none_or(|v| v.is_empty()))
            .collect();
        if missing.is_empty() {
            Some(record)
        } else {
            log::debug!(
                "Dropping '{key}' item {} missing {}",
                index + 1,
                missing.join(", ")
            );
            None
        }
    })
}

fn take(record: &mut Record, field: &str) -> String {
    record.remove(field).unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
