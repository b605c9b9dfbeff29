//! CSV incident records

use crate::error::CliError;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Rows of one input CSV file, with the position of the address column
#[derive(Debug, Clone)]
pub struct RecordSet {
    /// Header row
    pub headers: Vec<String>,
    /// Data rows, each as long as `headers`
    pub rows: Vec<Vec<String>>,
    address_column: usize,
}

impl RecordSet {
    /// Read a CSV file, locating `column` in its header row
    pub fn from_path(path: &Path, column: &str) -> Result<Self> {
        let reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        Self::from_csv(reader, column, &path.display().to_string())
    }

    /// Read CSV data from any reader; `source` names it in error messages
    pub fn from_reader<R: Read>(reader: R, column: &str, source: &str) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader), column, source)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, column: &str, source: &str) -> Result<Self> {
        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header row of {source}"))?
            .iter()
            .map(str::to_string)
            .collect();

        let address_column = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| CliError::MissingColumn {
                column: column.to_string(),
                file: source.to_string(),
            })?;

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let row = result.with_context(|| format!("Failed to read row {} of {source}", idx + 1))?;
            rows.push(row.iter().map(str::to_string).collect());
        }

        log::debug!("read {} records from {}", rows.len(), source);

        Ok(Self {
            headers,
            rows,
            address_column,
        })
    }

    /// Raw address of every row, in row order
    pub fn addresses(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row[self.address_column].trim())
            .collect()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the file has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
