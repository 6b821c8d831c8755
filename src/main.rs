//! # etl-vendor CLI
//!
//! Binary entry point for the `etl-vendor` tool.
//!
//! Its responsibilities are limited to parsing command-line arguments with
//! `clap` and running the mirror pipeline; all core logic lives in the
//! library crate. Any pipeline error propagates as a non-zero exit status
//! with a diagnostic naming the failed stage.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
