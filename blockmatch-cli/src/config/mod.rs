//! Configuration module

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::{Context, Result};
use blockmatch_core::{
    ExecutionConfig, ExecutionMode, MatcherConfig, NormalizerConfig, ResolverConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Additional normalization rules
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// Processing-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Input column holding the raw address
    pub address_column: String,

    /// Execution mode: sequential, parallel or adaptive
    pub execution_mode: ExecutionMode,

    /// House-number offset for block retries (0 disables)
    pub fuzzy_offset: u32,

    /// Record count at which adaptive mode goes parallel
    pub parallel_threshold: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            address_column: "block_address".to_string(),
            execution_mode: ExecutionMode::Adaptive,
            fuzzy_offset: ResolverConfig::default().fuzzy_offset,
            parallel_threshold: ExecutionConfig::default().parallel_threshold,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Emit the normalized address as a `ba_clean` column
    pub include_normalized: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "csv".to_string(),
            pretty_json: true,
            include_normalized: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content = FileReader::read_text(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(e.to_string()))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::debug!("loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Core matcher configuration derived from this file
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            normalizer: self.normalizer.clone(),
            resolver: ResolverConfig {
                fuzzy_offset: self.processing.fuzzy_offset,
            },
            execution: ExecutionConfig {
                mode: self.processing.execution_mode,
                parallel_threshold: self.processing.parallel_threshold,
                threads: self.performance.worker_threads,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.processing.address_column, "block_address");
        assert_eq!(config.output.default_format, "csv");

        let matcher = config.matcher_config();
        assert_eq!(matcher.resolver.fuzzy_offset, 5);
        assert_eq!(matcher.execution.mode, ExecutionMode::Adaptive);
        assert_eq!(matcher.execution.threads, 0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[processing]
execution_mode = "parallel"

[normalizer]
extra_corrections = [{{ from = "CONN AV", to = "CONNECTICUT AV" }}]
"#
        )
        .unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.processing.execution_mode, ExecutionMode::Parallel);
        assert_eq!(config.processing.fuzzy_offset, 5);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.normalizer.extra_corrections.len(), 1);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[processing]\nexecution_mode = \"sideways\"\n").unwrap();

        let err = CliConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/blockmatch.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}
