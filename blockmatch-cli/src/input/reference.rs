//! Reference block table loader
//!
//! Reads the DC block-centroid export (`PSEUDO_OBJECTID`, `ONSTREETDISPLAY`,
//! ...) or the same columns in snake case.

use crate::error::CliError;
use anyhow::{Context, Result};
use blockmatch_core::{BlockSegment, Point, ReferenceIndex};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    #[serde(rename = "PSEUDO_OBJECTID", alias = "id")]
    id: i64,
    #[serde(rename = "ONSTREETDISPLAY", alias = "on_street")]
    on_street: String,
    #[serde(rename = "FROMSTREETDISPLAY", alias = "from_street", default)]
    from_street: Option<String>,
    #[serde(rename = "TOSTREETDISPLAY", alias = "to_street", default)]
    to_street: Option<String>,
    #[serde(rename = "LOWER_RANGE", alias = "low")]
    low: String,
    #[serde(rename = "HIGHER_RANGE", alias = "high")]
    high: String,
    #[serde(rename = "X", alias = "x")]
    x: f64,
    #[serde(rename = "Y", alias = "y")]
    y: f64,
}

impl ReferenceRow {
    fn into_segment(self) -> Result<BlockSegment> {
        let low = parse_range(&self.low)
            .with_context(|| format!("segment {}: bad LOWER_RANGE {:?}", self.id, self.low))?;
        let high = parse_range(&self.high)
            .with_context(|| format!("segment {}: bad HIGHER_RANGE {:?}", self.id, self.high))?;

        Ok(BlockSegment {
            id: self.id,
            on_street: self.on_street.trim().to_string(),
            from_street: non_empty(self.from_street),
            to_street: non_empty(self.to_street),
            low,
            high,
            point: Point::new(self.x, self.y),
        })
    }
}

fn non_empty(street: Option<String>) -> Option<String> {
    street
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// House-number bounds are exported either as integers or as whole floats
fn parse_range(value: &str) -> Result<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Ok(n);
    }
    let float: f64 = value.parse().context("not a number")?;
    if float.fract() != 0.0 || !float.is_finite() || float.abs() > i64::MAX as f64 {
        anyhow::bail!("not a whole number");
    }
    Ok(float as i64)
}

/// Parse reference rows from CSV data
pub fn read_segments<R: Read>(reader: R, source: &str) -> Result<Vec<BlockSegment>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut segments = Vec::new();

    for (idx, result) in reader.deserialize::<ReferenceRow>().enumerate() {
        let row = result
            .map_err(|e| CliError::ReferenceError(format!("row {}: {e}", idx + 1)))
            .with_context(|| format!("Failed to parse {source}"))?;
        segments.push(
            row.into_segment()
                .with_context(|| format!("Failed to parse {source}, row {}", idx + 1))?,
        );
    }

    Ok(segments)
}

/// Load a reference CSV file and build the lookup index
pub fn load_reference(path: &Path) -> Result<ReferenceIndex> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()).into());
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open reference table: {}", path.display()))?;
    let segments = read_segments(file, &path.display().to_string())?;

    let index = ReferenceIndex::build(segments)
        .map_err(|e| CliError::ReferenceError(e.to_string()))
        .with_context(|| format!("Invalid reference table: {}", path.display()))?;
    log::info!(
        "loaded {} block segments from {}",
        index.len(),
        path.display()
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DC_EXPORT: &str = "\
PSEUDO_OBJECTID,ONSTREETDISPLAY,FROMSTREETDISPLAY,TOSTREETDISPLAY,LOWER_RANGE,HIGHER_RANGE,X,Y
2,K STREET NW,7TH STREET NW,,700,798,-77.0219,38.9023
1,MAIN STREET NW,1ST STREET NW,2ND STREET NW,100.0,198.0,-77.0123,38.9001
";

    #[test]
    fn test_reads_dc_export() {
        let segments = read_segments(DC_EXPORT.as_bytes(), "blocks").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].on_street, "K STREET NW");
        assert_eq!(segments[0].to_street, None);
        assert_eq!(segments[1].low, 100);
        assert_eq!(segments[1].high, 198);
        assert_eq!(segments[1].from_street.as_deref(), Some("1ST STREET NW"));
    }

    #[test]
    fn test_reads_snake_case_headers() {
        let data = "id,on_street,from_street,to_street,low,high,x,y\n\
                    5,A STREET NE,B STREET NE,C STREET NE,0,98,1.5,2.5\n";
        let segments = read_segments(data.as_bytes(), "snake").unwrap();
        assert_eq!(segments[0].id, 5);
        assert_eq!(segments[0].point, Point::new(1.5, 2.5));
    }

    #[test]
    fn test_fractional_range_rejected() {
        let data = "id,on_street,from_street,to_street,low,high,x,y\n\
                    5,A STREET NE,,,0.5,98,1.5,2.5\n";
        let err = read_segments(data.as_bytes(), "frac").unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_load_reference_builds_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blocks.csv");
        fs::write(&path, DC_EXPORT).unwrap();

        let index = load_reference(&path).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.range_lookup("MAIN STREET NW", 150), vec![1]);
    }

    #[test]
    fn test_load_reference_rejects_duplicate_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dupes.csv");
        fs::write(
            &path,
            "id,on_street,from_street,to_street,low,high,x,y\n\
             1,A,,,0,10,0,0\n\
             1,B,,,0,10,0,0\n",
        )
        .unwrap();

        let err = load_reference(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid reference table"));
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_load_reference_missing_file() {
        let err = load_reference(Path::new("/nonexistent/blocks.csv")).unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}
