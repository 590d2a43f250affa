//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Import case-study markdown into rich-document JSON.
#[derive(Parser, Debug)]
#[command(name = "casework", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, global = true, env = "CASEWORK_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a case-study file into CaseStudy JSON.
    Import {
        /// Case-study markdown file.
        file: String,

        /// Output file (defaults to stdout, or `<slug>.json` in the
        /// configured output directory).
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Compile a plain markdown file into Document JSON.
    Compile {
        /// Markdown file.
        file: String,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Repair a Document JSON file that still holds raw markdown.
    Normalize {
        /// Document JSON file.
        file: String,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<String>,

        /// Only report whether the document is already normalized.
        #[arg(long)]
        check: bool,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Write the authoring template.
    Template {
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "output.pretty").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "output.pretty").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to the platform config directory).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["casework"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["casework", "template", "-v", "--config", "/c.toml"]);
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("/c.toml"));
    }

    #[test]
    fn test_import_command() {
        let args = CliArgs::parse_from(["casework", "import", "study.md", "-o", "out.json"]);
        match args.command {
            Some(Command::Import {
                file,
                output,
                pretty,
            }) => {
                assert_eq!(file, "study.md");
                assert_eq!(output.as_deref(), Some("out.json"));
                assert!(!pretty);
            }
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_compile_command_pretty() {
        let args = CliArgs::parse_from(["casework", "compile", "notes.md", "--pretty"]);
        match args.command {
            Some(Command::Compile { file, pretty, .. }) => {
                assert_eq!(file, "notes.md");
                assert!(pretty);
            }
            _ => panic!("Expected Compile command"),
        }
    }

    #[test]
    fn test_normalize_check() {
        let args = CliArgs::parse_from(["casework", "normalize", "doc.json", "--check"]);
        match args.command {
            Some(Command::Normalize { check, output, .. }) => {
                assert!(check);
                assert!(output.is_none());
            }
            _ => panic!("Expected Normalize command"),
        }
    }

    #[test]
    fn test_import_requires_file() {
        assert!(CliArgs::try_parse_from(["casework", "import"]).is_err());
    }

    #[test]
    fn test_config_get() {
        let args = CliArgs::parse_from(["casework", "config", "get", "output.pretty"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Get { key },
            })) => assert_eq!(key, "output.pretty"),
            _ => panic!("Expected Config Get command"),
        }
    }

    #[test]
    fn test_config_init_force() {
        let args = CliArgs::parse_from(["casework", "config", "init", "--file", "x.toml", "--force"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Init { file, force },
            })) => {
                assert_eq!(file.as_deref(), Some("x.toml"));
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
