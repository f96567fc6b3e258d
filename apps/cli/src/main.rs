//! WikiCorpus CLI — build text corpora from Wikipedia categories.
//!
//! Walks a JSON taxonomy of categories, collects member articles, trims them,
//! and saves the result as JSON or CSV.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli)?;
    commands::run(cli).await
}
