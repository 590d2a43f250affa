//! Error types for Casework operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all Casework crates. Uses `thiserror` for derive macros.
//!
//! Only the case-study import boundary produces author-facing errors
//! ([`Error::MissingFrontmatter`] and [`Error::Validation`]). The markdown
//! compiler never fails; the remaining variants cover the CLI's file and
//! configuration handling.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using Casework's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Casework operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The document does not open with a `---` delimited frontmatter block.
    #[error("Missing frontmatter: the document must start with a '---' line and close the block with another '---' line")]
    MissingFrontmatter,

    /// One or more frontmatter fields failed validation.
    #[error("{}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Whether this error was raised by the author-facing import boundary.
    pub fn is_import_error(&self) -> bool {
        matches!(self, Self::MissingFrontmatter | Self::Validation(_))
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    let mut out = match errors.len() {
        1 => "1 validation error".to_string(),
        n => format!("{n} validation errors"),
    };
    for error in errors {
        out.push_str("\n  - ");
        out.push_str(&error.message);
    }
    out
}

// ============================================================================
// ValidationError
// ============================================================================

/// A single failed field check.
///
/// The message always names the field so an author can find it without the
/// structured `field` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Frontmatter key the error refers to.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    /// A required field is absent or empty.
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{field} is required"),
        }
    }

    /// A field value is outside its closed set of allowed values.
    pub fn not_one_of(field: &str, value: &str, allowed: &[&str]) -> Self {
        Self {
            field: field.to_string(),
            message: format!(
                "{field} \"{value}\" is not one of: {}",
                allowed.join(", ")
            ),
        }
    }

    /// A field value is present but malformed.
    pub fn invalid(field: &str, reason: impl fmt::Display) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{field} {reason}"),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_names_field() {
        let err = ValidationError::missing("slug");
        assert_eq!(err.field, "slug");
        assert_eq!(err.to_string(), "slug is required");
    }

    #[test]
    fn test_not_one_of_lists_choices() {
        let err = ValidationError::not_one_of("category", "Magic", &["Operations", "Retail"]);
        assert_eq!(
            err.message,
            "category \"Magic\" is not one of: Operations, Retail"
        );
    }

    #[test]
    fn test_validation_display_lists_every_message() {
        let err = Error::Validation(vec![
            ValidationError::missing("title"),
            ValidationError::missing("slug"),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 validation errors"));
        assert!(text.contains("title is required"));
        assert!(text.contains("slug is required"));
        assert_eq!(err.validation_errors().len(), 2);
        assert!(err.is_import_error());
    }

    #[test]
    fn test_single_validation_error_wording() {
        let err = Error::Validation(vec![ValidationError::missing("title")]);
        assert!(err.to_string().starts_with("1 validation error\n"));
    }

    #[test]
    fn test_io_with_path_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(io, "/tmp/case.md");
        assert!(err.to_string().contains("/tmp/case.md"));
        assert!(!err.is_import_error());
        assert!(err.validation_errors().is_empty());
    }
}
