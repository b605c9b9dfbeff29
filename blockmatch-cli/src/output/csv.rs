//! CSV output formatter

use super::{MatchedRecord, OutputFormatter, MATCH_COLUMNS, NORMALIZED_COLUMN};
use anyhow::{Context, Result};
use ::csv::Writer;
use std::io::Write;

/// CSV formatter - echoes every input column and appends the match columns
pub struct CsvFormatter<W: Write> {
    writer: Writer<W>,
    include_normalized: bool,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter
    pub fn new(writer: W, include_normalized: bool) -> Self {
        Self {
            writer: Writer::from_writer(writer),
            include_normalized,
        }
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl<W: Write + Send + Sync> OutputFormatter for CsvFormatter<W> {
    fn begin(&mut self, headers: &[String]) -> Result<()> {
        let mut row: Vec<&str> = headers.iter().map(String::as_str).collect();
        if self.include_normalized {
            row.push(NORMALIZED_COLUMN);
        }
        row.extend(MATCH_COLUMNS);
        self.writer
            .write_record(&row)
            .context("Failed to write CSV header")
    }

    fn format_record(&mut self, record: &MatchedRecord<'_>) -> Result<()> {
        let geocode = record.geocode;
        let mut row = record.fields.to_vec();
        if self.include_normalized {
            row.push(geocode.normalized.clone());
        }
        row.push(optional(geocode.block_id()));
        row.push(geocode.code().code().to_string());
        row.push(optional(geocode.point.map(|p| p.x)));
        row.push(optional(geocode.point.map(|p| p.y)));
        self.writer
            .write_record(&row)
            .context("Failed to write CSV record")
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmatch_core::{AddressShape, Geocode, MatchResult, Point};

    fn geocode(result: MatchResult, point: Option<Point>) -> Geocode {
        Geocode {
            normalized: "150 BLOCK OF MAIN STREET NW".to_string(),
            shape: AddressShape::BlockOf,
            result,
            candidates: usize::from(result.is_matched()),
            point,
        }
    }

    fn render(include_normalized: bool, geocodes: &[Geocode]) -> String {
        let mut out = Vec::new();
        {
            let mut formatter = CsvFormatter::new(&mut out, include_normalized);
            let headers = vec!["block_address".to_string()];
            formatter.begin(&headers).unwrap();
            let fields = vec!["150 B/O MAIN ST NW".to_string()];
            for geocode in geocodes {
                formatter
                    .format_record(&MatchedRecord {
                        fields: &fields,
                        geocode,
                    })
                    .unwrap();
            }
            formatter.finish().unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_matched_and_unmatched_rows() {
        let text = render(
            true,
            &[
                geocode(MatchResult::Matched(1), Some(Point::new(-77.5, 38.25))),
                geocode(MatchResult::UnmatchableBlock, None),
            ],
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "block_address,ba_clean,block_id,block_match,X,Y");
        assert_eq!(
            lines[1],
            "150 B/O MAIN ST NW,150 BLOCK OF MAIN STREET NW,1,1,-77.5,38.25"
        );
        assert_eq!(
            lines[2],
            "150 B/O MAIN ST NW,150 BLOCK OF MAIN STREET NW,,-3,,"
        );
    }

    #[test]
    fn test_without_normalized_column() {
        let text = render(false, &[geocode(MatchResult::AddressMissing, None)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "block_address,block_id,block_match,X,Y");
        assert_eq!(lines[1], "150 B/O MAIN ST NW,,-1,,");
    }
}
