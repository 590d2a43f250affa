//! Casework CLI
//!
//! Imports case-study markdown into rich-document JSON.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use casework_cli::CliArgs;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    casework_cli::run(args).await?;
    Ok(())
}
