//! Address normalization and block matching for DC incident records
//!
//! Raw addresses such as `"1500 B/O MLK AVE SE"` are rewritten into the
//! canonical street names used by the DC block reference table, then
//! resolved to a block segment by house-number range or by street
//! intersection.
//!
//! ```no_run
//! use blockmatch_core::{BatchMatcher, BlockSegment, Point, ReferenceIndex};
//! use std::sync::Arc;
//!
//! let index = ReferenceIndex::build(vec![BlockSegment {
//!     id: 1,
//!     on_street: "MAIN STREET NW".to_string(),
//!     from_street: None,
//!     to_street: None,
//!     low: 100,
//!     high: 198,
//!     point: Point::new(-77.0, 38.9),
//! }])?;
//! let matcher = BatchMatcher::new(Arc::new(index))?;
//! let geocode = matcher.match_one("150 B/O MAIN ST NW");
//! assert_eq!(geocode.block_id(), Some(1));
//! # Ok::<(), blockmatch_core::CoreError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod index;
pub mod normalizer;
pub mod processing;
pub mod report;
pub mod resolver;
pub mod types;

// Re-export key types
pub use config::{
    ExecutionConfig, ExecutionMode, MatcherConfig, NormalizerConfig, Replacement, ResolverConfig,
};
pub use error::{CoreError, Result};
pub use index::ReferenceIndex;
pub use normalizer::{AddressNormalizer, Stage};
pub use processing::{BatchMatcher, BatchOutput, Geocode};
pub use report::{
    AddressCount, CategoryStats, MatchReport, UnmatchedAddresses, UnmatchedList,
};
pub use resolver::{BlockResolver, Resolution};
pub use types::{
    AddressShape, BlockSegment, KnownBlock, MatchCode, MatchResult, Point, SegmentId,
    KNOWN_MISSING_BLOCKS,
};
