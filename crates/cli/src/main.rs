mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    herdbook_observability::init();

    let cli = Cli::parse();
    // The reference day is read once and threaded through every computation.
    let now = cli.now.unwrap_or_else(|| chrono::Local::now().date_naive());

    let engine = commands::load_engine(cli.config.as_deref(), cli.species)?;
    let animals = commands::load_herd(&cli.herd)?;
    tracing::info!(animals = animals.len(), %now, "herd loaded");

    let output = commands::run(&cli.command, &engine, &animals, now)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
