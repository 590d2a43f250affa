//! Case-study documents: frontmatter metadata plus named long-form sections.
//!
//! - [`frontmatter`]: The `---` block and its restricted `key: value` syntax
//! - [`schema`]: Field shapes, enumerations, and the section heading table
//! - [`sections`]: Body splitting by `## ` heading
//! - [`validate`]: Required-field and enumeration checks
//! - [`import`]: The full pipeline
//! - [`template`]: Downloadable authoring template

pub mod frontmatter;
pub mod import;
pub mod schema;
pub mod sections;
pub mod template;
pub mod validate;

pub use import::{
    extract, extract_with, import_case_study, import_case_study_with, CaseStudy, ExtractOptions,
    Extracted,
};
pub use schema::{
    Category, Faq, FieldShape, FieldValue, Industry, Metadata, ResultMetric, SectionKey,
    SECTION_HEADINGS,
};
pub use template::TEMPLATE;
pub use validate::{validate, CaseStudyMeta};
