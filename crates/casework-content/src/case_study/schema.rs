//! Case-study schema: field shapes, closed enumerations, and section keys.
//!
//! Everything the extractor, the validator, and the template must agree on
//! lives here as a named constant.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Field shapes
// ============================================================================

/// How an array-valued frontmatter field is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// `  - value` lines.
    Strings,
    /// `  - label:` items with `value` and optional `context`.
    Results,
    /// `  - question:` items with `answer`.
    Faqs,
}

/// Array fields with a record shape. Any other array key is a string list.
pub const ARRAY_FIELD_SHAPES: &[(&str, FieldShape)] = &[
    ("results", FieldShape::Results),
    ("faqs", FieldShape::Faqs),
];

/// Look up the array shape for `key`.
pub fn shape_of(key: &str) -> FieldShape {
    ARRAY_FIELD_SHAPES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(FieldShape::Strings, |(_, shape)| *shape)
}

/// Sub-field names of a record-shaped array item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFields {
    /// Fields an item must have; items missing one are dropped.
    pub required: &'static [&'static str],
    /// Fields an item may have.
    pub optional: &'static [&'static str],
}

impl RecordFields {
    /// Whether `name` is a required or optional sub-field.
    pub fn accepts(&self, name: &str) -> bool {
        self.required.contains(&name) || self.optional.contains(&name)
    }
}

impl FieldShape {
    /// Record layout for record shapes, `None` for string lists.
    pub fn record_fields(self) -> Option<RecordFields> {
        match self {
            Self::Strings => None,
            Self::Results => Some(RecordFields {
                required: &["label", "value"],
                optional: &["context"],
            }),
            Self::Faqs => Some(RecordFields {
                required: &["question", "answer"],
                optional: &[],
            }),
        }
    }
}

// ============================================================================
// Metadata values
// ============================================================================

/// One headline result, e.g. `{label: "Speed", value: "2x"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetric {
    /// What was measured.
    pub label: String,
    /// The outcome.
    pub value: String,
    /// Optional qualifier ("per month", "first quarter").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// A question and answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    /// The question.
    pub question: String,
    /// The answer.
    pub answer: String,
}

/// A parsed frontmatter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// `key: value`
    Text(String),
    /// `key:` followed by `  - value` lines.
    List(Vec<String>),
    /// `results:` records.
    Results(Vec<ResultMetric>),
    /// `faqs:` records.
    Faqs(Vec<Faq>),
}

impl FieldValue {
    /// Short description of the value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "a single value",
            Self::List(_) => "a list",
            Self::Results(_) => "a list of results",
            Self::Faqs(_) => "a list of questions",
        }
    }
}

/// Flat frontmatter map, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<String, FieldValue>,
}

impl Metadata {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(key.into(), value)
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Whether `key` was present in the frontmatter.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Scalar value for `key`, if it is one.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// String list for `key`, empty if absent or not a list.
    pub fn list(&self, key: &str) -> &[String] {
        match self.fields.get(key) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Parsed `results` records.
    pub fn results(&self) -> &[ResultMetric] {
        match self.fields.get("results") {
            Some(FieldValue::Results(items)) => items,
            _ => &[],
        }
    }

    /// Parsed `faqs` records.
    pub fn faqs(&self) -> &[Faq] {
        match self.fields.get("faqs") {
            Some(FieldValue::Faqs(items)) => items,
            _ => &[],
        }
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was parsed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// Known fields
// ============================================================================

/// Fields that must be present and non-empty.
pub const REQUIRED_FIELDS: &[&str] = &["title", "slug", "category", "short_description"];

/// Optional single-value fields.
pub const OPTIONAL_TEXT_FIELDS: &[&str] = &[
    "client_name",
    "industry",
    "hero_image",
    "duration",
    "published",
    "featured",
];

/// Optional string-list fields.
pub const LIST_FIELDS: &[&str] = &["technologies", "services"];

/// Whether `key` is part of the case-study schema.
pub fn is_known_field(key: &str) -> bool {
    REQUIRED_FIELDS.contains(&key)
        || OPTIONAL_TEXT_FIELDS.contains(&key)
        || LIST_FIELDS.contains(&key)
        || ARRAY_FIELD_SHAPES.iter().any(|(name, _)| *name == key)
}

// ============================================================================
// Closed enumerations
// ============================================================================

/// Error returned when a label is not part of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = $label]
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Every label, in display order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// Canonical label as authored in frontmatter.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.label() == s)
                    .ok_or_else(|| UnknownLabel(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Service category a case study is filed under.
    pub enum Category {
        AiAutomation => "AI & Automation",
        Operations => "Operations",
        WebDevelopment => "Web Development",
        DataAnalytics => "Data & Analytics",
        CloudInfrastructure => "Cloud & Infrastructure",
        DigitalStrategy => "Digital Strategy",
    }
}

labelled_enum! {
    /// Client industry.
    pub enum Industry {
        Healthcare => "Healthcare",
        Finance => "Finance",
        Retail => "Retail",
        Manufacturing => "Manufacturing",
        Technology => "Technology",
        Education => "Education",
        RealEstate => "Real Estate",
        Hospitality => "Hospitality",
        Logistics => "Logistics",
        ProfessionalServices => "Professional Services",
        NonProfit => "Non-Profit",
        Other => "Other",
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Long-form section of a case study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    /// Who the client is.
    Context,
    /// What was wrong.
    Problem,
    /// What success looked like.
    Goals,
    /// What was built.
    Solution,
    /// How it was delivered.
    Implementation,
    /// Outcomes in prose.
    ResultsNarrative,
    /// What comes next.
    NextSteps,
}

impl SectionKey {
    /// Key as used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Problem => "problem",
            Self::Goals => "goals",
            Self::Solution => "solution",
            Self::Implementation => "implementation",
            Self::ResultsNarrative => "results_narrative",
            Self::NextSteps => "next_steps",
        }
    }

    /// Heading that opens this section.
    pub fn heading(self) -> &'static str {
        SECTION_HEADINGS
            .iter()
            .find(|entry| entry.key == self)
            .map_or("", |entry| entry.heading)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `## heading` recognized as a section delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeading {
    /// Heading text, without the `## ` prefix.
    pub heading: &'static str,
    /// Section it opens.
    pub key: SectionKey,
}

/// The recognized section headings, in template order.
pub const SECTION_HEADINGS: &[SectionHeading] = &[
    SectionHeading { heading: "Client & Context", key: SectionKey::Context },
    SectionHeading { heading: "Problem", key: SectionKey::Problem },
    SectionHeading { heading: "Goals", key: SectionKey::Goals },
    SectionHeading { heading: "Solution", key: SectionKey::Solution },
    SectionHeading { heading: "Implementation", key: SectionKey::Implementation },
    SectionHeading { heading: "Results", key: SectionKey::ResultsNarrative },
    SectionHeading { heading: "Next Steps", key: SectionKey::NextSteps },
];

/// Section opened by `heading`, matched exactly.
pub fn section_for_heading(heading: &str) -> Option<SectionKey> {
    SECTION_HEADINGS
        .iter()
        .find(|entry| entry.heading == heading)
        .map(|entry| entry.key)
}
