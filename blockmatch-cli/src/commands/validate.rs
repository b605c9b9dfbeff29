//! Validate command implementation

use super::init_logging;
use crate::config::CliConfig;
use crate::input::load_reference;
use anyhow::Result;
use blockmatch_core::BatchMatcher;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Reference block table to check
    #[arg(short, long, value_name = "FILE", required = true)]
    pub reference: PathBuf,

    /// Configuration file to check alongside the table
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        println!("Validating reference table: {}", self.reference.display());

        let checked = CliConfig::load(self.config.as_deref()).and_then(|config| {
            let index = load_reference(&self.reference)?;
            let segments = index.len();
            BatchMatcher::with_config(Arc::new(index), &config.matcher_config())?;
            Ok(segments)
        });

        match checked {
            Ok(segments) => {
                println!("✓ Reference table is valid!");
                println!("  Block segments: {segments}");
                if let Some(config) = &self.config {
                    println!("  Configuration: {}", config.display());
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Validation failed!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
