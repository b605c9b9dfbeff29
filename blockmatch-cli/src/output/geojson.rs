//! GeoJSON output formatter
//!
//! Only matched records carry a location, so unmatched ones are skipped.

use super::json::record_object;
use super::{MatchedRecord, OutputFormatter};
use anyhow::Result;
use serde_json::{json, Value};
use std::io::Write;

/// GeoJSON formatter - one Point feature per matched record
pub struct GeoJsonFormatter<W: Write> {
    writer: W,
    headers: Vec<String>,
    features: Vec<Value>,
    pretty: bool,
    include_normalized: bool,
    skipped: usize,
}

impl<W: Write> GeoJsonFormatter<W> {
    /// Create a new GeoJSON formatter
    pub fn new(writer: W, pretty: bool, include_normalized: bool) -> Self {
        Self {
            writer,
            headers: Vec::new(),
            features: Vec::new(),
            pretty,
            include_normalized,
            skipped: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for GeoJsonFormatter<W> {
    fn begin(&mut self, headers: &[String]) -> Result<()> {
        self.headers = headers.to_vec();
        Ok(())
    }

    fn format_record(&mut self, record: &MatchedRecord<'_>) -> Result<()> {
        let Some(point) = record.geocode.point else {
            self.skipped += 1;
            return Ok(());
        };
        let properties = record_object(&self.headers, record, self.include_normalized);
        self.features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [point.x, point.y],
            },
            "properties": properties,
        }));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        log::debug!(
            "wrote {} features, skipped {} unmatched records",
            self.features.len(),
            self.skipped
        );
        let collection = json!({
            "type": "FeatureCollection",
            "features": std::mem::take(&mut self.features),
        });
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &collection)?;
        } else {
            serde_json::to_writer(&mut self.writer, &collection)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmatch_core::{AddressShape, Geocode, MatchResult, Point};

    #[test]
    fn test_only_matched_records_become_features() {
        let matched = Geocode {
            normalized: "150 BLOCK OF MAIN STREET NW".to_string(),
            shape: AddressShape::BlockOf,
            result: MatchResult::Matched(1),
            candidates: 1,
            point: Some(Point::new(-77.01, 38.9)),
        };
        let unmatched = Geocode {
            normalized: "NATIONAL MALL".to_string(),
            shape: AddressShape::Other,
            result: MatchResult::OtherUnmatchable,
            candidates: 0,
            point: None,
        };

        let mut out = Vec::new();
        {
            let mut formatter = GeoJsonFormatter::new(&mut out, true, false);
            formatter.begin(&["block_address".to_string()]).unwrap();
            for geocode in [&matched, &unmatched] {
                let fields = vec![geocode.normalized.clone()];
                formatter
                    .format_record(&MatchedRecord {
                        fields: &fields,
                        geocode,
                    })
                    .unwrap();
            }
            formatter.finish().unwrap();
        }

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["geometry"]["coordinates"][0], -77.01);
        assert_eq!(features[0]["properties"]["block_id"], 1);
        assert!(features[0]["properties"].get("ba_clean").is_none());
    }
}
