//! blockmatch command-line entry point

use anyhow::Result;
use blockmatch_cli::commands::Commands;
use clap::Parser;

/// Normalize DC street addresses and match them to reference blocks
#[derive(Debug, Parser)]
#[command(name = "blockmatch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    Cli::parse().command.execute()
}
