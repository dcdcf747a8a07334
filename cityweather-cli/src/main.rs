//! Binary crate for the `cityweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive lookup prompt and API key configuration
//! - Human-friendly output formatting

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod logger;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    logger::init(cmd.verbose);
    cmd.run().await
}
