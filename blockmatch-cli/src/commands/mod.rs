//! CLI command implementations

use anyhow::Result;
use blockmatch_core::{MatchCode, KNOWN_MISSING_BLOCKS};
use clap::{Subcommand, ValueEnum};

pub mod generate_config;
pub mod match_blocks;
pub mod normalize;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Match CSV incident records to reference blocks
    Match(match_blocks::MatchArgs),

    /// Print the normalized form of addresses
    Normalize(normalize::NormalizeArgs),

    /// Check a reference table and configuration file
    Validate(validate::ValidateArgs),

    /// Write a default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List match outcome codes
    Codes,

    /// List blocks known to be missing from the reference data
    KnownBlocks,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Match(args) => args.execute(),
            Commands::Normalize(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Listing text for the subcommand
    pub fn render(&self) -> String {
        match self {
            ListCommands::Codes => MatchCode::ALL
                .iter()
                .map(|code| format!("{:>3}  {}\n", code.code(), code.label()))
                .collect(),
            ListCommands::KnownBlocks => KNOWN_MISSING_BLOCKS
                .iter()
                .map(|block| {
                    format!(
                        "{}  ({:.6}, {:.6})\n",
                        block.address, block.latitude, block.longitude
                    )
                })
                .collect(),
            ListCommands::Formats => match_blocks::OutputFormat::value_variants()
                .iter()
                .filter_map(|format| format.to_possible_value())
                .map(|value| {
                    format!(
                        "{:<8} {}\n",
                        value.get_name(),
                        value.get_help().map(|h| h.to_string()).unwrap_or_default()
                    )
                })
                .collect(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // A logger may already be installed when commands run in-process
        let env = env_logger::Env::default().default_filter_or(log_level);
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_codes() {
        let text = ListCommands::Codes.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "  1  Matched");
        assert_eq!(lines[5], " -5  Other unmatchable address");
    }

    #[test]
    fn test_list_known_blocks() {
        let text = ListCommands::KnownBlocks.render();
        assert_eq!(
            text,
            "400 BLOCK OF 2ND STREET NW  (38.895470, -77.013673)\n"
        );
    }

    #[test]
    fn test_list_formats() {
        let text = ListCommands::Formats.render();
        assert!(text.starts_with("csv"));
        assert!(text.contains("geojson"));
    }

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::KnownBlocks,
        };
        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("KnownBlocks"));
    }
}
