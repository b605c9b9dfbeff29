//! Read-only lookup structure over reference block segments
//!
//! Segments are stored in ascending id order, and every lookup returns ids in
//! that order, so the first candidate is the same regardless of how the source
//! table was sorted.

use crate::error::{CoreError, Result};
use crate::types::{BlockSegment, Point, SegmentId};
use std::collections::{HashMap, HashSet};

/// Immutable index over block segments
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    /// All segments, sorted by id
    segments: Vec<BlockSegment>,
    /// id -> position in `segments`
    positions: HashMap<SegmentId, usize>,
    /// on street -> positions, ascending
    by_street: HashMap<String, Vec<usize>>,
    /// on street -> cross street (from or to) -> positions, ascending
    by_corner: HashMap<String, HashMap<String, Vec<usize>>>,
}

impl ReferenceIndex {
    /// Validate segments and build the index
    pub fn build(segments: impl IntoIterator<Item = BlockSegment>) -> Result<Self> {
        let mut segments: Vec<BlockSegment> = segments.into_iter().collect();
        if segments.is_empty() {
            return Err(CoreError::EmptyReference);
        }

        let mut seen = HashSet::with_capacity(segments.len());
        for segment in &segments {
            validate(segment)?;
            if !seen.insert(segment.id) {
                return Err(CoreError::DuplicateSegmentId { id: segment.id });
            }
        }

        segments.sort_by_key(|s| s.id);

        let mut positions = HashMap::with_capacity(segments.len());
        let mut by_street: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_corner: HashMap<String, HashMap<String, Vec<usize>>> = HashMap::new();

        for (pos, segment) in segments.iter().enumerate() {
            positions.insert(segment.id, pos);
            by_street
                .entry(segment.on_street.clone())
                .or_default()
                .push(pos);

            let crosses = [&segment.from_street, &segment.to_street];
            for cross in crosses.into_iter().flatten() {
                let entries = by_corner
                    .entry(segment.on_street.clone())
                    .or_default()
                    .entry(cross.clone())
                    .or_default();
                // from == to would otherwise list the segment twice
                if entries.last() != Some(&pos) {
                    entries.push(pos);
                }
            }
        }

        log::debug!(
            "built reference index: {} segments, {} streets",
            segments.len(),
            by_street.len()
        );

        Ok(Self {
            segments,
            positions,
            by_street,
            by_corner,
        })
    }

    /// Segments on `street` whose range contains `number`
    pub fn range_lookup(&self, street: &str, number: i64) -> Vec<SegmentId> {
        self.by_street
            .get(street)
            .into_iter()
            .flatten()
            .map(|&pos| &self.segments[pos])
            .filter(|segment| segment.contains(number))
            .map(|segment| segment.id)
            .collect()
    }

    /// Segments lying on one street and bounded by the other, in either order
    pub fn corner_lookup(&self, a: &str, b: &str) -> Vec<SegmentId> {
        let mut hits: Vec<usize> = self
            .crossing(a, b)
            .iter()
            .chain(self.crossing(b, a))
            .copied()
            .collect();
        hits.sort_unstable();
        hits.dedup();
        hits.into_iter().map(|pos| self.segments[pos].id).collect()
    }

    fn crossing(&self, on: &str, cross: &str) -> &[usize] {
        self.by_corner
            .get(on)
            .and_then(|crosses| crosses.get(cross))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Look up a segment by id
    pub fn segment(&self, id: SegmentId) -> Option<&BlockSegment> {
        self.positions.get(&id).map(|&pos| &self.segments[pos])
    }

    /// Representative point of a segment
    pub fn point(&self, id: SegmentId) -> Option<Point> {
        self.segment(id).map(|s| s.point)
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the index holds no segments (never true for a built index)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate segments in id order
    pub fn iter(&self) -> impl Iterator<Item = &BlockSegment> {
        self.segments.iter()
    }
}

fn validate(segment: &BlockSegment) -> Result<()> {
    if segment.id <= 0 {
        return Err(CoreError::InvalidSegmentId { id: segment.id });
    }
    if segment.low > segment.high {
        return Err(CoreError::InvalidRange {
            id: segment.id,
            low: segment.low,
            high: segment.high,
        });
    }
    if !segment.point.is_finite() {
        return Err(CoreError::InvalidCoordinate { id: segment.id });
    }
    Ok(())
}
