//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Address column absent from an input file
    MissingColumn {
        /// Requested column
        column: String,
        /// File that lacks it
        file: String,
    },
    /// Input files disagree on their header row
    HeaderMismatch(String),
    /// Reference table could not be loaded
    ReferenceError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::MissingColumn { column, file } => {
                write!(f, "Column '{column}' not found in {file}")
            }
            CliError::HeaderMismatch(file) => {
                write!(f, "Header row of {file} differs from the first input file")
            }
            CliError::ReferenceError(msg) => write!(f, "Reference table error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
