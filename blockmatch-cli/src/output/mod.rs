//! Output formatting module

use anyhow::Result;
use blockmatch_core::Geocode;

/// One input row together with its match outcome
#[derive(Debug, Clone, Copy)]
pub struct MatchedRecord<'a> {
    /// Input fields, aligned with the header row
    pub fields: &'a [String],
    /// Match outcome for the row's address
    pub geocode: &'a Geocode,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Start output for records with the given input header row
    fn begin(&mut self, headers: &[String]) -> Result<()>;

    /// Format and output a single record
    fn format_record(&mut self, record: &MatchedRecord<'_>) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Columns appended to every input row
pub const MATCH_COLUMNS: [&str; 4] = ["block_id", "block_match", "X", "Y"];

/// Column holding the normalized address
pub const NORMALIZED_COLUMN: &str = "ba_clean";

pub mod csv;
pub mod geojson;
pub mod json;

pub use self::csv::CsvFormatter;
pub use geojson::GeoJsonFormatter;
pub use json::JsonFormatter;
