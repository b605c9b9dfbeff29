//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to add local spelling fixes");
        println!("2. Validate it against your reference table:");
        println!(
            "   blockmatch validate -r blocks.csv --config {}",
            self.output.display()
        );
        println!("3. Use it for matching:");
        println!(
            "   blockmatch match -i incidents.csv -r blocks.csv --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Template configuration content, equal to the built-in defaults
    fn generate_template() -> &'static str {
        r#"# blockmatch configuration

[processing]
# Input column holding the raw address
address_column = "block_address"

# sequential, parallel, or adaptive (parallel at parallel_threshold records)
execution_mode = "adaptive"
parallel_threshold = 1000

# When a house number falls in no block range, retry with +N then -N.
# 0 disables the retries.
fuzzy_offset = 5

[output]
# csv, json, or geojson
default_format = "csv"
pretty_json = true

# Add the normalized address as a ba_clean column
include_normalized = true

[performance]
# Number of worker threads (0 = auto)
worker_threads = 0

[normalizer]
# Literal corrections applied after the built-in spelling list. The text must
# be preceded by a space and is replaced at its last occurrence.
extra_corrections = [
    # { from = "CONN AV", to = "CONNECTICUT AV" },
]

# Whole-address overrides applied after the built-in ones
extra_overrides = [
    # { from = "1200 BLOCK OF OLD STREET NW", to = "1210 BLOCK OF OLD STREET NW" },
]
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_args_debug() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("blockmatch.toml"),
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("GenerateConfigArgs"));
        assert!(debug_str.contains("blockmatch.toml"));
    }

    #[test]
    fn test_template_matches_defaults() {
        let parsed: CliConfig = toml::from_str(GenerateConfigArgs::generate_template()).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("blockmatch.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
        };

        assert!(args.execute().is_ok());

        let config = CliConfig::from_file(&output_path).unwrap();
        assert_eq!(config.processing.fuzzy_offset, 5);
    }
}
