//! Configuration types for the matcher

use serde::{Deserialize, Serialize};

/// A literal `from -> to` text replacement supplied by configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Text to look for
    pub from: String,
    /// Text to substitute
    pub to: String,
}

impl Replacement {
    /// Create a replacement
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Extensions to the built-in normalization tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Spelling corrections applied after the built-in list, in order
    pub extra_corrections: Vec<Replacement>,
    /// Whole-address overrides checked after the built-in spot fixes
    pub extra_overrides: Vec<Replacement>,
}

/// Lookup policy for the block resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// House-number offset tried (first added, then subtracted) when the exact
    /// number falls in no range. Zero disables the retries.
    pub fuzzy_offset: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { fuzzy_offset: 5 }
    }
}

/// Execution mode for batch matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Single-threaded
    Sequential,
    /// Multi-threaded via rayon
    Parallel,
    /// Parallel above `parallel_threshold` records, sequential below
    Adaptive,
}

impl ExecutionMode {
    /// Pick the concrete mode for a batch of `records` records
    pub fn select(self, records: usize, parallel_threshold: usize) -> ExecutionMode {
        match self {
            ExecutionMode::Adaptive if records >= parallel_threshold => {
                if cfg!(feature = "parallel") {
                    ExecutionMode::Parallel
                } else {
                    ExecutionMode::Sequential
                }
            }
            ExecutionMode::Adaptive => ExecutionMode::Sequential,
            ExecutionMode::Parallel if !cfg!(feature = "parallel") => ExecutionMode::Sequential,
            other => other,
        }
    }
}

/// Batch execution settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Execution mode selector
    pub mode: ExecutionMode,
    /// Minimum record count for adaptive mode to go parallel
    pub parallel_threshold: usize,
    /// Number of worker threads (0 = one per CPU)
    pub threads: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Adaptive,
            parallel_threshold: 1_000,
            threads: 0,
        }
    }
}

/// Complete matcher configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Normalization table extensions
    pub normalizer: NormalizerConfig,
    /// Lookup policy
    pub resolver: ResolverConfig,
    /// Batch execution
    pub execution: ExecutionConfig,
}
