//! Configuration for the Casework CLI.
//!
//! Provides the [`CaseworkConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `CASEWORK_CONFIG` environment variable
//! 3. Platform default: `<config dir>/casework/config.toml`
//! 4. Built-in defaults
//!
//! `CASEWORK_<SECTION>_<KEY>` variables (e.g. `CASEWORK_OUTPUT_PRETTY`)
//! override file values.

use std::path::{Path, PathBuf};

use casework_core::{Error, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Deserializer, Serialize};

const PROJECT_NAME: &str = "casework";
const ENV_PREFIX: &str = "CASEWORK";
const CONFIG_ENV_VAR: &str = "CASEWORK_CONFIG";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseworkConfig {
    /// JSON output settings.
    pub output: OutputConfig,

    /// Import settings.
    pub import: ImportConfig,
}

/// JSON output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON even without `--pretty`.
    #[serde(deserialize_with = "lenient_bool")]
    pub pretty: bool,

    /// Directory that `import` writes `<slug>.json` into when no `-o` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

/// Import settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Log unknown section headings at warn instead of debug.
    #[serde(deserialize_with = "lenient_bool")]
    pub warn_unknown_headings: bool,
}

/// Accept a TOML boolean or the strings `"true"`/`"false"`.
///
/// Environment overrides always arrive as strings.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected true or false, found \"{other}\""
            ))),
        },
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl CaseworkConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("output");
        env_opts.add_section("import");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        resolve_path(
            explicit,
            std::env::var(CONFIG_ENV_VAR).ok().as_deref(),
            Self::default_config_path(),
        )
    }

    /// Return the platform default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Name used in hints printed to the user.
    pub fn project_name() -> &'static str {
        PROJECT_NAME
    }

    /// File that `import` writes for `slug` when an output directory is configured.
    pub fn import_output_path(&self, slug: &str) -> Option<PathBuf> {
        self.output
            .directory
            .as_deref()
            .map(|dir| Path::new(dir).join(format!("{slug}.json")))
    }
}

fn resolve_path(
    explicit: Option<&str>,
    from_env: Option<&str>,
    default: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .or(from_env.filter(|p| !p.is_empty()))
        .map(PathBuf::from)
        .or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Default tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_casework_config_default() {
        let config = CaseworkConfig::default();
        assert!(!config.output.pretty);
        assert!(config.output.directory.is_none());
        assert!(!config.import.warn_unknown_headings);
    }

    // ------------------------------------------------------------------------
    // Serialization tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_casework_config_from_toml() {
        let toml_str = r#"
            [output]
            pretty = true
            directory = "/srv/case-studies"

            [import]
            warn_unknown_headings = true
        "#;

        let config: CaseworkConfig = toml::from_str(toml_str).unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.output.directory.as_deref(), Some("/srv/case-studies"));
        assert!(config.import.warn_unknown_headings);
    }

    #[test]
    fn test_string_booleans_accepted() {
        let config: CaseworkConfig =
            toml::from_str("[output]\npretty = \"true\"\n[import]\nwarn_unknown_headings = \"no\"\n")
                .unwrap();
        assert!(config.output.pretty);
        assert!(!config.import.warn_unknown_headings);

        assert!(toml::from_str::<CaseworkConfig>("[output]\npretty = \"maybe\"\n").is_err());
    }

    #[test]
    fn test_casework_config_to_toml() {
        let config = CaseworkConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("pretty = false"));
        assert!(toml_str.contains("warn_unknown_headings = false"));

        // Round-trip
        let parsed: CaseworkConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    // ------------------------------------------------------------------------
    // Loading tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_casework_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [output]
                directory = "/tmp/out"
            "#,
        )
        .unwrap();

        let config = CaseworkConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.output.directory.as_deref(), Some("/tmp/out"));
    }

    #[test]
    fn test_casework_config_load_defaults() {
        let config = CaseworkConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert!(config.output.directory.is_none());
    }

    // ------------------------------------------------------------------------
    // Path resolution tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_path_explicit_wins() {
        let path = resolve_path(
            Some("/explicit/config.toml"),
            Some("/env/config.toml"),
            Some(PathBuf::from("/default/config.toml")),
        );
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_path_env_before_default() {
        let path = resolve_path(
            None,
            Some("/env/config.toml"),
            Some(PathBuf::from("/default/config.toml")),
        );
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_path_default() {
        let path = resolve_path(None, Some(""), Some(PathBuf::from("/default/config.toml")));
        assert_eq!(path, Some(PathBuf::from("/default/config.toml")));
        assert_eq!(resolve_path(None, None, None), None);
    }

    #[test]
    fn test_default_config_path_shape() {
        if let Some(path) = CaseworkConfig::default_config_path() {
            assert!(path.ends_with("casework/config.toml"));
        }
    }

    #[test]
    fn test_import_output_path() {
        let mut config = CaseworkConfig::default();
        assert!(config.import_output_path("demo").is_none());
        config.output.directory = Some("/out".into());
        assert_eq!(
            config.import_output_path("demo"),
            Some(PathBuf::from("/out/demo.json"))
        );
    }

    #[test]
    fn test_casework_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CaseworkConfig>();
    }
}
