//! Slug normalization utilities.
//!
//! Case studies are addressed by a lowercase kebab-case slug. These helpers
//! produce that form from titles and file names, and are used by the
//! importer to check that an authored slug is already normalized.

use std::path::Path;

/// Normalize a string to a lowercase kebab-case slug.
///
/// Performs the following transformations:
/// 1. Trims leading/trailing whitespace
/// 2. Converts to lowercase
/// 3. Treats underscores and any other non-alphanumeric character as a separator
/// 4. Collapses runs of separators into single hyphens
///
/// # Examples
///
/// ```
/// use casework_core::util::ids::normalize_slug;
///
/// assert_eq!(normalize_slug("Warehouse Automation"), "warehouse-automation");
/// assert_eq!(normalize_slug("ops_dashboard"), "ops-dashboard");
/// assert_eq!(normalize_slug("  AI & Automation  "), "ai-automation");
/// assert_eq!(normalize_slug("already-kebab"), "already-kebab");
/// ```
pub fn normalize_slug(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

/// Whether `slug` is already in normalized form.
///
/// ```
/// use casework_core::util::ids::is_normalized_slug;
///
/// assert!(is_normalized_slug("retail-rollout"));
/// assert!(!is_normalized_slug("Retail Rollout"));
/// assert!(!is_normalized_slug(""));
/// ```
pub fn is_normalized_slug(slug: &str) -> bool {
    !slug.is_empty() && normalize_slug(slug) == slug
}

/// Compute a slug from a file path's stem.
///
/// Returns `None` if the path has no file stem.
///
/// ```
/// use std::path::Path;
/// use casework_core::util::ids::slug_from_path;
///
/// assert_eq!(
///     slug_from_path(Path::new("/content/Clinic_Scheduling.md")),
///     Some("clinic-scheduling".to_string())
/// );
/// assert_eq!(slug_from_path(Path::new("/")), None);
/// ```
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(normalize_slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // normalize_slug tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_normalize_slug_simple() {
        assert_eq!(normalize_slug("logistics"), "logistics");
    }

    #[test]
    fn test_normalize_slug_with_spaces() {
        assert_eq!(normalize_slug("Clinic Scheduling"), "clinic-scheduling");
    }

    #[test]
    fn test_normalize_slug_with_underscores() {
        assert_eq!(normalize_slug("data_platform_migration"), "data-platform-migration");
    }

    #[test]
    fn test_normalize_slug_punctuation() {
        assert_eq!(normalize_slug("Q3: 2x Faster!"), "q3-2x-faster");
    }

    #[test]
    fn test_normalize_slug_collapses_separators() {
        assert_eq!(normalize_slug("a -- b__c"), "a-b-c");
    }

    #[test]
    fn test_normalize_slug_empty() {
        assert_eq!(normalize_slug(""), "");
        assert_eq!(normalize_slug("   "), "");
    }

    #[test]
    fn test_normalize_slug_unicode_letters_kept() {
        assert_eq!(normalize_slug("Café Rollout"), "café-rollout");
    }

    #[test]
    fn test_is_normalized_slug() {
        assert!(is_normalized_slug("demo"));
        assert!(!is_normalized_slug("demo-"));
        assert!(!is_normalized_slug("-demo"));
        assert!(!is_normalized_slug("de mo"));
    }

    // -------------------------------------------------------------------------
    // slug_from_path tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_slug_from_path_nested() {
        let path = Path::new("/content/case-studies/Retail POS.md");
        assert_eq!(slug_from_path(path), Some("retail-pos".to_string()));
    }

    #[test]
    fn test_slug_from_path_no_extension() {
        let path = Path::new("/content/README");
        assert_eq!(slug_from_path(path), Some("readme".to_string()));
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_normalize_slug_is_idempotent(s in "[a-zA-Z0-9 _&:-]{0,40}") {
                let once = normalize_slug(&s);
                prop_assert_eq!(normalize_slug(&once), once.clone());
                prop_assert!(once.is_empty() || is_normalized_slug(&once));
            }
        }
    }
}
