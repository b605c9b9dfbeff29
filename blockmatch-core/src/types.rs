//! Shared value types for segments, match outcomes, and address shapes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a reference block segment (always positive)
pub type SegmentId = i64;

/// Representative point of a segment in the reference table's projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Easting / longitude
    pub x: f64,
    /// Northing / latitude
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One row of the reference table: a single block of a single street
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSegment {
    /// Unique identifier
    pub id: SegmentId,
    /// Canonical name of the street the block lies on
    pub on_street: String,
    /// Cross street bounding the low end of the block
    pub from_street: Option<String>,
    /// Cross street bounding the high end of the block
    pub to_street: Option<String>,
    /// Lowest house number on the block (inclusive)
    pub low: i64,
    /// Highest house number on the block (inclusive)
    pub high: i64,
    /// Representative point
    pub point: Point,
}

impl BlockSegment {
    /// Whether `number` lies within this segment's inclusive range
    pub fn contains(&self, number: i64) -> bool {
        self.low <= number && number <= self.high
    }
}

/// Match outcome code attached to every resolved record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchCode {
    /// A segment was found
    Matched,
    /// Empty input
    AddressMissing,
    /// The literal "Multiple/Unknown Address" sentinel
    MultipleOrUnknownAddress,
    /// Block-of shape with no covering range, even after fuzzy retries
    UnmatchableBlock,
    /// Corner shape with no segment pairing both streets
    UnmatchableCorner,
    /// Neither shape recognized
    OtherUnmatchable,
}

impl MatchCode {
    /// All codes in report order
    pub const ALL: [MatchCode; 6] = [
        MatchCode::Matched,
        MatchCode::AddressMissing,
        MatchCode::MultipleOrUnknownAddress,
        MatchCode::UnmatchableBlock,
        MatchCode::UnmatchableCorner,
        MatchCode::OtherUnmatchable,
    ];

    /// Integer encoding: 1 for a match, negative for each failure kind
    pub fn code(self) -> i8 {
        match self {
            MatchCode::Matched => 1,
            MatchCode::AddressMissing => -1,
            MatchCode::MultipleOrUnknownAddress => -2,
            MatchCode::UnmatchableBlock => -3,
            MatchCode::UnmatchableCorner => -4,
            MatchCode::OtherUnmatchable => -5,
        }
    }

    /// Decode an integer code
    pub fn from_code(code: i8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            MatchCode::Matched => "Matched",
            MatchCode::AddressMissing => "Address Missing",
            MatchCode::MultipleOrUnknownAddress => "Address listed as 'Multiple/Unknown Address'",
            MatchCode::UnmatchableBlock => "Unmatchable block",
            MatchCode::UnmatchableCorner => "Unmatchable corner",
            MatchCode::OtherUnmatchable => "Other unmatchable address",
        }
    }
}

impl fmt::Display for MatchCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of resolving one normalized address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Matched the given segment
    Matched(SegmentId),
    /// Empty input
    AddressMissing,
    /// Sentinel input
    MultipleOrUnknownAddress,
    /// Block-of shape, no covering range
    UnmatchableBlock,
    /// Corner shape, no pairing segment
    UnmatchableCorner,
    /// Unrecognized shape
    OtherUnmatchable,
}

impl MatchResult {
    /// Outcome code without the payload
    pub fn code(&self) -> MatchCode {
        match self {
            MatchResult::Matched(_) => MatchCode::Matched,
            MatchResult::AddressMissing => MatchCode::AddressMissing,
            MatchResult::MultipleOrUnknownAddress => MatchCode::MultipleOrUnknownAddress,
            MatchResult::UnmatchableBlock => MatchCode::UnmatchableBlock,
            MatchResult::UnmatchableCorner => MatchCode::UnmatchableCorner,
            MatchResult::OtherUnmatchable => MatchCode::OtherUnmatchable,
        }
    }

    /// Matched segment id, if any
    pub fn block_id(&self) -> Option<SegmentId> {
        match self {
            MatchResult::Matched(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether a segment was found
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }
}

/// Shape category of a raw, unnormalized address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressShape {
    /// `<number> BLOCK OF <street>` (or `B/O`)
    BlockOf,
    /// `<street> & <street>` (or `/`)
    Corner,
    /// Anything else
    Other,
}

impl AddressShape {
    /// All shapes in report order
    pub const ALL: [AddressShape; 3] = [
        AddressShape::BlockOf,
        AddressShape::Corner,
        AddressShape::Other,
    ];

    /// Classify a raw address as it appeared in the source data
    pub fn classify(raw: &str) -> Self {
        let digits = raw.bytes().take_while(u8::is_ascii_digit).count();
        let rest = &raw[digits..];

        if digits > 0 && (rest.starts_with(" BLOCK OF ") || rest.starts_with(" B/O ")) {
            AddressShape::BlockOf
        } else if raw.contains(" & ") || raw.contains(" / ") {
            AddressShape::Corner
        } else {
            AddressShape::Other
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            AddressShape::BlockOf => "Block of",
            AddressShape::Corner => "Corner",
            AddressShape::Other => "Other",
        }
    }
}

impl fmt::Display for AddressShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A block known to be absent from the reference table, with a surveyed location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownBlock {
    /// Normalized block-of address
    pub address: &'static str,
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
}

/// Blocks missing from the reference table. Callers may apply these as manual
/// overrides; the resolver never does.
pub const KNOWN_MISSING_BLOCKS: &[KnownBlock] = &[KnownBlock {
    address: "400 BLOCK OF 2ND STREET NW",
    latitude: 38.895470,
    longitude: -77.013673,
}];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_code_round_trip() {
        for code in MatchCode::ALL {
            assert_eq!(MatchCode::from_code(code.code()), Some(code));
        }
        assert_eq!(MatchCode::from_code(0), None);
        assert_eq!(MatchCode::Matched.code(), 1);
        assert_eq!(MatchCode::OtherUnmatchable.code(), -5);
    }

    #[test]
    fn test_match_result_accessors() {
        let matched = MatchResult::Matched(42);
        assert!(matched.is_matched());
        assert_eq!(matched.block_id(), Some(42));
        assert_eq!(matched.code(), MatchCode::Matched);

        let missing = MatchResult::AddressMissing;
        assert!(!missing.is_matched());
        assert_eq!(missing.block_id(), None);
        assert_eq!(missing.code().code(), -1);
    }

    #[test]
    fn test_shape_classification() {
        assert_eq!(
            AddressShape::classify("100 BLOCK OF MAIN ST NW"),
            AddressShape::BlockOf
        );
        assert_eq!(
            AddressShape::classify("100 B/O MAIN ST NW"),
            AddressShape::BlockOf
        );
        assert_eq!(
            AddressShape::classify("7TH ST & K ST NW"),
            AddressShape::Corner
        );
        assert_eq!(
            AddressShape::classify("7TH ST / K ST NW"),
            AddressShape::Corner
        );
        assert_eq!(AddressShape::classify(""), AddressShape::Other);
        assert_eq!(
            AddressShape::classify("Multiple/Unknown Address"),
            AddressShape::Other
        );
    }

    #[test]
    fn test_segment_contains_is_inclusive() {
        let segment = BlockSegment {
            id: 1,
            on_street: "MAIN STREET NW".to_string(),
            from_street: None,
            to_street: None,
            low: 100,
            high: 198,
            point: Point::new(0.0, 0.0),
        };
        assert!(segment.contains(100));
        assert!(segment.contains(198));
        assert!(!segment.contains(99));
        assert!(!segment.contains(199));
    }
}
