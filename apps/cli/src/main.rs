//! kbforge CLI, the document and web knowledge extraction tool.
//!
//! Reads documents and web pages, extracts question/answer pairs or
//! content blocks, and writes a JSON knowledge snapshot.

mod commands;

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
