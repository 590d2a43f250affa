//! The import pipeline: raw document to validated, compiled case study.

use std::borrow::Cow;
use std::collections::BTreeMap;

use casework_core::{Document, Result};
use serde::Serialize;

use super::frontmatter::{parse_frontmatter, split_frontmatter};
use super::schema::{is_known_field, FieldValue, Metadata, SectionKey};
use super::sections::split_sections;
use super::validate::{validate, CaseStudyMeta};
use crate::markdown::compile_document;

/// Knobs for [`extract_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Log unknown section headings at warn instead of debug.
    pub warn_unknown_headings: bool,
}

/// A document split into metadata and raw section text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Validated metadata.
    pub meta: CaseStudyMeta,
    /// Every parsed frontmatter field, including unknown keys.
    pub metadata: Metadata,
    /// Trimmed markdown of each recognized section.
    pub sections: BTreeMap<SectionKey, String>,
}

/// A fully imported case study, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudy {
    /// Validated frontmatter, serialized inline at the top level.
    #[serde(flatten)]
    pub meta: CaseStudyMeta,
    /// Compiled document for each recognized section.
    pub sections: BTreeMap<SectionKey, Document>,
    /// Frontmatter keys outside the schema, kept as parsed.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, FieldValue>,
}

/// Extract a document with default options.
pub fn extract(raw: &str) -> Result<Extracted> {
    extract_with(raw, &ExtractOptions::default())
}

/// Split, parse and validate a document, then cut its body into sections.
///
/// Fails with [`casework_core::Error::MissingFrontmatter`] or
/// [`casework_core::Error::Validation`]; sections are only read once the
/// metadata is valid.
///
/// # Example
///
/// ```rust
/// use casework_content::case_study::import::extract;
/// use casework_content::case_study::schema::SectionKey;
///
/// let raw = "---\ntitle: \"Demo\"\nslug: demo\ncategory: \"AI & Automation\"\nshort_description: \"x\"\n---\n## Problem\nSlow.\n## Solution\nFast.";
/// let extracted = extract(raw).unwrap();
/// assert_eq!(extracted.meta.title, "Demo");
/// assert_eq!(extracted.sections[&SectionKey::Problem], "Slow.");
/// assert!(!extracted.sections.contains_key(&SectionKey::Goals));
/// ```
pub fn extract_with(raw: &str, options: &ExtractOptions) -> Result<Extracted> {
    let raw = normalize_line_endings(raw);
    let (block, body) = split_frontmatter(&raw)?;
    let metadata = parse_frontmatter(block);
    let meta = validate(&metadata)?;
    let sections = split_sections(body, options.warn_unknown_headings);
    log::debug!(
        "Extracted '{}' with {} field(s) and {} section(s)",
        meta.slug,
        metadata.len(),
        sections.len()
    );
    Ok(Extracted {
        meta,
        metadata,
        sections,
    })
}

/// Import a case study with default options.
pub fn import_case_study(raw: &str) -> Result<CaseStudy> {
    import_case_study_with(raw, &ExtractOptions::default())
}

/// Extract a document and compile each section into a [`Document`].
pub fn import_case_study_with(raw: &str, options: &ExtractOptions) -> Result<CaseStudy> {
    let Extracted {
        meta,
        metadata,
        sections,
    } = extract_with(raw, options)?;

    let extra: BTreeMap<String, FieldValue> = metadata
        .iter()
        .filter(|(key, _)| !is_known_field(key))
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    if !extra.is_empty() {
        log::debug!(
            "Keeping unknown frontmatter keys: {}",
            extra.keys().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    let sections = sections
        .into_iter()
        .map(|(key, text)| (key, compile_document(&text)))
        .collect();

    Ok(CaseStudy {
        meta,
        sections,
        extra,
    })
}

fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}
