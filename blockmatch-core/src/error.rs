//! Core error types
//!
//! Address matching itself never fails; only building the lookup structures
//! can. Every variant here is raised before the first address is resolved.

use thiserror::Error;

/// Errors raised while constructing the reference index or the normalizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The reference table contained no segments
    #[error("reference table is empty")]
    EmptyReference,

    /// Two segments share an identifier
    #[error("duplicate segment id {id}")]
    DuplicateSegmentId {
        /// The repeated identifier
        id: i64,
    },

    /// Segment identifiers must be positive
    #[error("segment id {id} is not positive")]
    InvalidSegmentId {
        /// The offending identifier
        id: i64,
    },

    /// A segment's address range is inverted
    #[error("segment {id} has inverted range [{low}, {high}]")]
    InvalidRange {
        /// Segment identifier
        id: i64,
        /// Lower bound of the range
        low: i64,
        /// Upper bound of the range
        high: i64,
    },

    /// A segment's representative point is NaN or infinite
    #[error("segment {id} has a non-finite coordinate")]
    InvalidCoordinate {
        /// Segment identifier
        id: i64,
    },

    /// A rewrite rule could not be compiled
    #[error("invalid rewrite rule '{pattern}': {reason}")]
    InvalidRule {
        /// Source pattern of the rule
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    Parallel(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CoreError::DuplicateSegmentId { id: 7 }.to_string(),
            "duplicate segment id 7"
        );
        assert_eq!(
            CoreError::InvalidRange {
                id: 3,
                low: 200,
                high: 100
            }
            .to_string(),
            "segment 3 has inverted range [200, 100]"
        );
        assert_eq!(
            CoreError::EmptyReference.to_string(),
            "reference table is empty"
        );
    }
}
