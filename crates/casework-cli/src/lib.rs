//! # casework-cli
//!
//! Command-line front end for Casework:
//! - `import`: case-study markdown to CaseStudy JSON
//! - `compile`: plain markdown to Document JSON
//! - `normalize`: repair Document JSON that still holds raw markdown
//! - `template`: write the authoring template
//! - `config`: inspect and create the configuration file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::run;
pub use cli::CliArgs;
pub use config::CaseworkConfig;
