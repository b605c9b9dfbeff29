//! JSON output formatter

use super::{MatchedRecord, OutputFormatter, NORMALIZED_COLUMN};
use anyhow::Result;
use serde_json::{Map, Value};
use std::io::Write;

/// JSON formatter - outputs records as a JSON array of objects
pub struct JsonFormatter<W: Write> {
    writer: W,
    headers: Vec<String>,
    records: Vec<Value>,
    pretty: bool,
    include_normalized: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool, include_normalized: bool) -> Self {
        Self {
            writer,
            headers: Vec::new(),
            records: Vec::new(),
            pretty,
            include_normalized,
        }
    }
}

/// Input fields plus match columns as a JSON object
pub(crate) fn record_object(
    headers: &[String],
    record: &MatchedRecord<'_>,
    include_normalized: bool,
) -> Map<String, Value> {
    let geocode = record.geocode;
    let mut object: Map<String, Value> = headers
        .iter()
        .cloned()
        .zip(record.fields.iter().cloned().map(Value::String))
        .collect();
    if include_normalized {
        object.insert(
            NORMALIZED_COLUMN.to_string(),
            Value::String(geocode.normalized.clone()),
        );
    }
    object.insert("block_id".to_string(), geocode.block_id().into());
    object.insert("block_match".to_string(), geocode.code().code().into());
    object.insert("X".to_string(), geocode.point.map(|p| p.x).into());
    object.insert("Y".to_string(), geocode.point.map(|p| p.y).into());
    object
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn begin(&mut self, headers: &[String]) -> Result<()> {
        self.headers = headers.to_vec();
        Ok(())
    }

    fn format_record(&mut self, record: &MatchedRecord<'_>) -> Result<()> {
        let object = record_object(&self.headers, record, self.include_normalized);
        self.records.push(Value::Object(object));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.records)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
