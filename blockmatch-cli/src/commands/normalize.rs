//! Normalize command implementation

use super::init_logging;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::FileReader;
use anyhow::Result;
use blockmatch_core::AddressNormalizer;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the normalize command
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Addresses to normalize (reads stdin lines when omitted)
    #[arg(value_name = "ADDRESS")]
    pub addresses: Vec<String>,

    /// Show the address after every normalization stage
    #[arg(long)]
    pub trace: bool,

    /// Configuration file with extra normalization rules
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl NormalizeArgs {
    /// Execute the normalize command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let config = CliConfig::load(self.config.as_deref())?;
        let normalizer = AddressNormalizer::with_config(&config.normalizer)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let addresses = if self.addresses.is_empty() {
            FileReader::read_lines(io::stdin().lock())?
        } else {
            self.addresses.clone()
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render(&normalizer, &addresses, &mut out)?;
        out.flush()?;
        Ok(())
    }

    fn render<W: Write>(
        &self,
        normalizer: &AddressNormalizer,
        addresses: &[String],
        out: &mut W,
    ) -> Result<()> {
        for address in addresses {
            if self.trace {
                writeln!(out, "{address}")?;
                for (stage, text) in normalizer.normalize_trace(address) {
                    writeln!(out, "  {:<20}{}", stage.name(), text)?;
                }
            } else {
                writeln!(out, "{}", normalizer.normalize(address))?;
            }
        }
        Ok(())
    }
}
