//! Command execution for the `casework` binary.

use std::path::{Path, PathBuf};

use casework_content::{
    compile_document, import_case_study_with, is_normalized, normalize, ExtractOptions, TEMPLATE,
};
use casework_core::{slug_from_path, Document, Error, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::CaseworkConfig;
use crate::config_handlers;

/// Initialise tracing-based logging.
///
/// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI with parsed arguments.
pub async fn run(args: CliArgs) -> Result<()> {
    init_logging(args.verbose, args.quiet);

    let Some(command) = args.command else {
        println!(
            "{} {} (use --help for usage)",
            CaseworkConfig::project_name(),
            env!("CARGO_PKG_VERSION")
        );
        return Ok(());
    };

    let config_path = args.config.as_deref();
    let load_config = || CaseworkConfig::load(config_path);
    match command {
        Command::Import {
            file,
            output,
            pretty,
        } => cmd_import(&load_config()?, &file, output.as_deref(), pretty).await,
        Command::Compile {
            file,
            output,
            pretty,
        } => cmd_compile(&load_config()?, &file, output.as_deref(), pretty).await,
        Command::Normalize {
            file,
            output,
            check,
            pretty,
        } => cmd_normalize(&load_config()?, &file, output.as_deref(), check, pretty).await,
        Command::Template { output } => {
            write_output(output.as_deref().map(Path::new), TEMPLATE).await
        }
        Command::Config(config_cmd) => {
            config_handlers::handle_config_command(config_path, config_cmd.command)
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Import a case-study file and write its JSON.
pub async fn cmd_import(
    config: &CaseworkConfig,
    file: &str,
    output: Option<&str>,
    pretty: bool,
) -> Result<()> {
    let raw = read_input(file).await?;
    let options = ExtractOptions {
        warn_unknown_headings: config.import.warn_unknown_headings,
    };
    let study = import_case_study_with(&raw, &options).inspect_err(|e| suggest_slug(e, file))?;
    tracing::info!(
        slug = %study.meta.slug,
        sections = study.sections.len(),
        "Imported case study from {file}"
    );

    let target = output
        .map(PathBuf::from)
        .or_else(|| config.import_output_path(&study.meta.slug));
    let json = to_json(&study, pretty || config.output.pretty)?;
    write_output(target.as_deref(), &json).await
}

/// Point the author at a slug derived from the file name when theirs was rejected.
fn suggest_slug(err: &Error, file: &str) {
    let slug_rejected = err.validation_errors().iter().any(|e| e.field == "slug");
    if let Some(slug) = slug_from_path(Path::new(file)).filter(|_| slug_rejected) {
        tracing::info!("Hint: the file name suggests `slug: {slug}`");
    }
}

/// Compile a plain markdown file into Document JSON.
pub async fn cmd_compile(
    config: &CaseworkConfig,
    file: &str,
    output: Option<&str>,
    pretty: bool,
) -> Result<()> {
    let raw = read_input(file).await?;
    let doc = compile_document(&raw.replace("\r\n", "\n"));
    tracing::debug!(blocks = doc.content.len(), "Compiled {file}");
    let json = to_json(&doc, pretty || config.output.pretty)?;
    write_output(output.map(Path::new), &json).await
}

/// Normalize a Document JSON file, or check that it already is.
pub async fn cmd_normalize(
    config: &CaseworkConfig,
    file: &str,
    output: Option<&str>,
    check: bool,
    pretty: bool,
) -> Result<()> {
    let raw = read_input(file).await?;
    let doc: Document = serde_json::from_str(&raw)?;

    if check {
        return if is_normalized(&doc) {
            tracing::info!("{file} is normalized");
            Ok(())
        } else {
            Err(Error::invalid_data(format!(
                "{file} contains raw markdown; run `casework normalize` to repair it"
            )))
        };
    }

    let normalized = normalize(&doc);
    if normalized == doc {
        tracing::debug!("{file} was already normalized");
    }
    let json = to_json(&normalized, pretty || config.output.pretty)?;
    write_output(output.map(Path::new), &json).await
}

// ============================================================================
// I/O helpers
// ============================================================================

async fn read_input(file: &str) -> Result<String> {
    tokio::fs::read_to_string(file)
        .await
        .map_err(|e| Error::io_with_path(e, file))
}

/// Write `content` to `path`, or to stdout when no path is given.
async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    let Some(path) = path else {
        println!("{}", content.trim_end());
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(e, parent))?;
    }
    let mut content = content.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::io_with_path(e, path))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

// ============================================================================
// Tests
// ============================================================================
