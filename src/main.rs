mod archive;
mod batch;
mod cli;
mod content;
mod error;
mod naming;
mod navigation;
mod output;
mod pipeline;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_tracing(&cli);

    let root = std::env::current_dir().context("Failed to resolve the current directory")?;
    let files = batch::discover(&root, cli.recursive);
    if files.is_empty() {
        eprintln!("No EPUB files found");
        return Ok(());
    }

    // Per-file failures are reported as they happen and never fail the batch.
    let summary = batch::run(files, cli.delete).await;
    eprintln!("{summary}");

    Ok(())
}
