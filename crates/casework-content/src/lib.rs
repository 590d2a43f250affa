//! Casework Content: case-study extraction and markdown compilation.
//!
//! This crate turns authored case-study files into validated metadata and
//! rich document trees. It performs no I/O; callers pass in `&str` and get
//! values back.
//!
//! # Modules
//!
//! - [`case_study`]: Frontmatter and section extraction, validation, template
//! - [`markdown`]: Markdown-to-document compiler and repair pass
//!
//! # Example
//!
//! ```rust
//! use casework_content::{import_case_study, SectionKey};
//!
//! let raw = "---\n\
//!     title: \"Demo\"\n\
//!     slug: demo\n\
//!     category: \"AI & Automation\"\n\
//!     short_description: \"x\"\n\
//!     ---\n\
//!     ## Problem\n\
//!     Slow.\n";
//!
//! let study = import_case_study(raw).unwrap();
//! assert_eq!(study.meta.slug, "demo");
//! assert!(study.sections.contains_key(&SectionKey::Problem));
//! ```

#![forbid(unsafe_code)]

pub mod case_study;
pub mod markdown;

pub use case_study::{
    extract, extract_with, import_case_study, import_case_study_with, validate, CaseStudy,
    CaseStudyMeta, Category, ExtractOptions, Extracted, Faq, FieldValue, Industry, Metadata,
    ResultMetric, SectionKey, SECTION_HEADINGS, TEMPLATE,
};
pub use markdown::{compile_blocks, compile_document, is_normalized, normalize, parse_inline};
