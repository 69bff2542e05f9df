//! Binary crate for the `citycast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive city prompt and API key configuration
//! - Printing the reading view and the error view

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init()?;

    let cmd = cli::Cli::parse();
    cmd.run().await
}
