//! ResearchProfile CLI: build research profiles from a faculty roster.
//!
//! Fetches a paper's abstract from its landing page or PDF, summarizes it,
//! and tags the author's expertise.

mod commands;
mod session;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
