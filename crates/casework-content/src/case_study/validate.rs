//! Frontmatter validation into a typed [`CaseStudyMeta`].
//!
//! Every field is checked before anything is reported, so an author sees all
//! problems with a file at once in a single [`Error::Validation`].

use casework_core::{is_normalized_slug, normalize_slug, Error, Result, ValidationError};
use serde::{Deserialize, Serialize};

use super::schema::{Category, Faq, FieldValue, Industry, Metadata, ResultMetric};

/// Validated case-study metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudyMeta {
    /// Display title.
    pub title: String,
    /// Lowercase kebab-case identifier, used in URLs and file names.
    pub slug: String,
    /// Primary service category.
    pub category: Category,
    /// One-sentence summary for listings.
    pub short_description: String,
    /// Client, when it may be named.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// Client industry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    /// Path or URL of the lead image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    /// Engagement length as written ("12 weeks").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Technologies used.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Services delivered.
    #[serde(default)]
    pub services: Vec<String>,
    /// Headline results, in authored order.
    #[serde(default)]
    pub results: Vec<ResultMetric>,
    /// Frequently asked questions, in authored order.
    #[serde(default)]
    pub faqs: Vec<Faq>,
    /// Whether the study is live.
    #[serde(default)]
    pub published: bool,
    /// Whether the study is highlighted in listings.
    #[serde(default)]
    pub featured: bool,
}

/// Validate parsed frontmatter.
///
/// Required fields are `title`, `slug`, `category` and `short_description`,
/// each a non-empty single value. `category` and `industry` must equal one of
/// their labels exactly, `slug` must be lowercase kebab-case, and
/// `published`/`featured` must be `true` or `false`. A single value given for
/// a list field is read as a comma-separated list.
///
/// # Example
///
/// ```rust
/// use casework_content::case_study::frontmatter::parse_frontmatter;
/// use casework_content::case_study::validate::validate;
///
/// let metadata = parse_frontmatter("title: Demo\ncategory: Operations\nshort_description: x\n");
/// let err = validate(&metadata).unwrap_err();
/// assert!(err.to_string().contains("slug is required"));
/// ```
pub fn validate(metadata: &Metadata) -> Result<CaseStudyMeta> {
    let mut check = Checker {
        metadata,
        errors: Vec::new(),
    };

    let title = check.required("title");
    let slug = check.required("slug");
    let category_label = check.required("category");
    let short_description = check.required("short_description");

    if !slug.is_empty() && !is_normalized_slug(&slug) {
        check.fail(ValidationError::invalid(
            "slug",
            format!(
                "\"{slug}\" must be lowercase kebab-case (e.g. \"{}\")",
                normalize_slug(&slug)
            ),
        ));
    }

    let category = if category_label.is_empty() {
        None
    } else {
        check.label::<Category>("category", &category_label, Category::LABELS)
    };

    let industry = check
        .optional_text("industry")
        .and_then(|label| check.label::<Industry>("industry", &label, Industry::LABELS));

    let client_name = check.optional_text("client_name");
    let hero_image = check.optional_text("hero_image");
    let duration = check.optional_text("duration");
    let technologies = check.list("technologies");
    let services = check.list("services");
    let results = check.results();
    let faqs = check.faqs();
    let published = check.flag("published");
    let featured = check.flag("featured");

    match category {
        Some(category) if check.errors.is_empty() => Ok(CaseStudyMeta {
            title,
            slug,
            category,
            short_description,
            client_name,
            industry,
            hero_image,
            duration,
            technologies,
            services,
            results,
            faqs,
            published,
            featured,
        }),
        _ => {
            log::debug!("Frontmatter failed {} check(s)", check.errors.len());
            Err(Error::Validation(check.errors))
        }
    }
}

struct Checker<'a> {
    metadata: &'a Metadata,
    errors: Vec<ValidationError>,
}

impl Checker<'_> {
    fn fail(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn wrong_shape(&mut self, field: &str, expected: &str, found: &FieldValue) {
        self.fail(ValidationError::invalid(
            field,
            format!("must be {expected}, found {}", found.kind()),
        ));
    }

    /// Non-empty scalar, or an empty string after recording an error.
    fn required(&mut self, field: &str) -> String {
        match self.metadata.get(field) {
            Some(FieldValue::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Some(FieldValue::Text(_)) | None => {
                self.fail(ValidationError::missing(field));
                String::new()
            }
            Some(other) => {
                self.wrong_shape(field, "a single value", other);
                String::new()
            }
        }
    }

    /// Scalar if present; empty values count as absent.
    fn optional_text(&mut self, field: &str) -> Option<String> {
        match self.metadata.get(field)? {
            FieldValue::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            other => {
                self.wrong_shape(field, "a single value", other);
                None
            }
        }
    }

    fn label<T: std::str::FromStr>(
        &mut self,
        field: &str,
        value: &str,
        allowed: &[&str],
    ) -> Option<T> {
        match value.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.fail(ValidationError::not_one_of(field, value, allowed));
                None
            }
        }
    }

    fn list(&mut self, field: &str) -> Vec<String> {
        match self.metadata.get(field) {
            None => Vec::new(),
            Some(FieldValue::List(items)) => items.clone(),
            Some(FieldValue::Text(text)) => text
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
            Some(other) => {
                self.wrong_shape(field, "a list", other);
                Vec::new()
            }
        }
    }

    fn results(&mut self) -> Vec<ResultMetric> {
        match self.metadata.get("results") {
            None => Vec::new(),
            Some(FieldValue::Results(items)) => items.clone(),
            Some(other) => {
                self.wrong_shape("results", "a list of results", other);
                Vec::new()
            }
        }
    }

    fn faqs(&mut self) -> Vec<Faq> {
        match self.metadata.get("faqs") {
            None => Vec::new(),
            Some(FieldValue::Faqs(items)) => items.clone(),
            Some(other) => {
                self.wrong_shape("faqs", "a list of questions", other);
                Vec::new()
            }
        }
    }

    fn flag(&mut self, field: &str) -> bool {
        match self.optional_text(field).as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                self.fail(ValidationError::invalid(
                    field,
                    format!("must be true or false, found \"{other}\""),
                ));
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case_study::frontmatter::parse_frontmatter;

    const VALID: &str = "title: Demo\nslug: demo\ncategory: Operations\nshort_description: A demo\n";

    fn check(extra: &str) -> Result<CaseStudyMeta> {
        validate(&parse_frontmatter(&format!("{VALID}{extra}")))
    }

    fn fields(err: &Error) -> Vec<&str> {
        err.validation_errors()
            .iter()
            .map(|e| e.field.as_str())
            .collect()
    }

    // ------------------------------------------------------------------------
    // Accepted input
    // ------------------------------------------------------------------------

    #[test]
    fn test_minimal_valid() {
        let meta = check("").unwrap();
        assert_eq!(meta.title, "Demo");
        assert_eq!(meta.slug, "demo");
        assert_eq!(meta.category, Category::Operations);
        assert_eq!(meta.industry, None);
        assert!(meta.technologies.is_empty());
        assert!(!meta.published);
    }

    #[test]
    fn test_full_valid() {
        let meta = check(
            "client_name: Acme\nindustry: Real Estate\nduration: 12 weeks\npublished: true\nfeatured: false\ntechnologies:\n  - Rust\nresults:\n  - label: Speed\n    value: 2x\n",
        )
        .unwrap();
        assert_eq!(meta.client_name.as_deref(), Some("Acme"));
        assert_eq!(meta.industry, Some(Industry::RealEstate));
        assert!(meta.published);
        assert!(!meta.featured);
        assert_eq!(meta.technologies, vec!["Rust"]);
        assert_eq!(meta.results.len(), 1);
    }

    #[test]
    fn test_scalar_list_is_split_on_commas() {
        let meta = check("services: Strategy, Build ,\n").unwrap();
        assert_eq!(meta.services, vec!["Strategy", "Build"]);
    }

    #[test]
    fn test_empty_optional_is_absent() {
        let meta = check("industry: \"\"\n").unwrap();
        assert_eq!(meta.industry, None);
    }

    // ------------------------------------------------------------------------
    // Rejected input
    // ------------------------------------------------------------------------

    #[test]
    fn test_missing_slug_named() {
        let err = validate(&parse_frontmatter(
            "title: Demo\ncategory: Nonsense\nshort_description: x\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("slug"));
        assert!(fields(&err).contains(&"slug"));
    }

    #[test]
    fn test_all_errors_collected() {
        let err = validate(&Metadata::new()).unwrap_err();
        assert_eq!(
            fields(&err),
            vec!["title", "slug", "category", "short_description"]
        );
        assert!(err.to_string().starts_with("4 validation errors"));
    }

    #[test]
    fn test_blank_required_is_missing() {
        let err = validate(&parse_frontmatter(
            "title: \"  \"\nslug: demo\ncategory: Operations\nshort_description: x\n",
        ))
        .unwrap_err();
        assert_eq!(err.validation_errors(), &[ValidationError::missing("title")]);
    }

    #[test]
    fn test_category_must_match_label() {
        let err = validate(&parse_frontmatter(
            "title: T\nslug: t\ncategory: operations\nshort_description: x\n",
        ))
        .unwrap_err();
        let message = &err.validation_errors()[0].message;
        assert!(message.contains("category \"operations\""));
        assert!(message.contains("AI & Automation"));
    }

    #[test]
    fn test_unknown_industry() {
        let err = check("industry: Aerospace\n").unwrap_err();
        assert_eq!(fields(&err), vec!["industry"]);
    }

    #[test]
    fn test_slug_must_be_kebab_case() {
        let err = validate(&parse_frontmatter(
            "title: T\nslug: My Slug\ncategory: Operations\nshort_description: x\n",
        ))
        .unwrap_err();
        assert_eq!(fields(&err), vec!["slug"]);
        assert!(err.to_string().contains("my-slug"));
    }

    #[test]
    fn test_flags_must_be_boolean() {
        let err = check("published: yes\nfeatured: 1\n").unwrap_err();
        assert_eq!(fields(&err), vec!["published", "featured"]);
    }

    #[test]
    fn test_wrong_shapes() {
        let err = check("results: lots\nclient_name:\n  - Acme\n").unwrap_err();
        let fields = fields(&err);
        assert!(fields.contains(&"results"));
        assert!(fields.contains(&"client_name"));
        assert!(err.to_string().contains("must be a single value, found a list"));
    }
}
