//! Block resolution
//!
//! Classifies a normalized address as block-of, corner, or neither, and looks
//! it up in the reference index. Every input yields a definite
//! [`MatchResult`]; nothing here can fail once the resolver is built.

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::index::ReferenceIndex;
use crate::normalizer::rules::compile;
use crate::normalizer::tables::UNKNOWN_ADDRESS;
use crate::types::{MatchResult, SegmentId};
use regex::Regex;

/// Outcome of one resolution together with lookup diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The match outcome
    pub result: MatchResult,
    /// Number of segments the successful lookup returned (0 when unmatched)
    pub candidates: usize,
}

impl Resolution {
    fn unmatched(result: MatchResult) -> Self {
        Self {
            result,
            candidates: 0,
        }
    }

    fn from_hits(hits: &[SegmentId]) -> Option<Self> {
        hits.first().map(|&id| Self {
            result: MatchResult::Matched(id),
            candidates: hits.len(),
        })
    }

    /// Whether more than one segment satisfied the lookup
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

/// Resolves normalized addresses against a [`ReferenceIndex`]
#[derive(Debug, Clone)]
pub struct BlockResolver {
    block_of: Regex,
    corner: Regex,
    config: ResolverConfig,
}

impl BlockResolver {
    /// Create a resolver with the default ±5 retry policy
    pub fn new() -> Result<Self> {
        Self::with_config(ResolverConfig::default())
    }

    /// Create a resolver with a custom retry policy
    pub fn with_config(config: ResolverConfig) -> Result<Self> {
        Ok(Self {
            block_of: compile(r"^([0-9]+) BLOCK OF (.*)$")?,
            corner: compile(r"^(.*) [&/] (.*)$")?,
            config,
        })
    }

    /// Resolve a normalized address
    pub fn resolve(&self, normalized: &str, index: &ReferenceIndex) -> MatchResult {
        self.resolve_detailed(normalized, index).result
    }

    /// Resolve a normalized address, also reporting how many candidates matched
    pub fn resolve_detailed(&self, normalized: &str, index: &ReferenceIndex) -> Resolution {
        if normalized.is_empty() || normalized == "nan" {
            return Resolution::unmatched(MatchResult::AddressMissing);
        }
        if normalized == UNKNOWN_ADDRESS {
            return Resolution::unmatched(MatchResult::MultipleOrUnknownAddress);
        }

        if let Some(caps) = self.block_of.captures(normalized) {
            return self.resolve_block(&caps[1], &caps[2], index);
        }

        if let Some(caps) = self.corner.captures(normalized) {
            let hits = index.corner_lookup(&caps[1], &caps[2]);
            return Resolution::from_hits(&hits)
                .unwrap_or(Resolution::unmatched(MatchResult::UnmatchableCorner));
        }

        Resolution::unmatched(MatchResult::OtherUnmatchable)
    }

    /// Exact number first, then `+offset`, then `-offset`, both relative to
    /// the reported number
    fn resolve_block(&self, digits: &str, street: &str, index: &ReferenceIndex) -> Resolution {
        let Ok(number) = digits.parse::<i64>() else {
            log::trace!("block number {digits} out of range");
            return Resolution::unmatched(MatchResult::UnmatchableBlock);
        };

        let offset = i64::from(self.config.fuzzy_offset);
        let attempts = if offset == 0 {
            vec![Some(number)]
        } else {
            vec![
                Some(number),
                number.checked_add(offset),
                number.checked_sub(offset),
            ]
        };

        attempts
            .into_iter()
            .flatten()
            .find_map(|n| Resolution::from_hits(&index.range_lookup(street, n)))
            .unwrap_or(Resolution::unmatched(MatchResult::UnmatchableBlock))
    }

    /// Active retry policy
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockSegment, Point};

    fn segment(id: SegmentId, on: &str, low: i64, high: i64) -> BlockSegment {
        BlockSegment {
            id,
            on_street: on.to_string(),
            from_street: None,
            to_street: None,
            low,
            high,
            point: Point::new(0.0, 0.0),
        }
    }

    fn index(segments: Vec<BlockSegment>) -> ReferenceIndex {
        ReferenceIndex::build(segments).unwrap()
    }

    #[test]
    fn test_missing_and_sentinel() {
        let resolver = BlockResolver::new().unwrap();
        let index = index(vec![segment(1, "MAIN STREET NW", 100, 198)]);
        assert_eq!(resolver.resolve("", &index), MatchResult::AddressMissing);
        assert_eq!(resolver.resolve("nan", &index), MatchResult::AddressMissing);
        assert_eq!(
            resolver.resolve("Multiple/Unknown Address", &index),
            MatchResult::MultipleOrUnknownAddress
        );
    }

    #[test]
    fn test_exact_then_plus_then_minus() {
        let resolver = BlockResolver::new().unwrap();
        let index = index(vec![
            segment(1, "MAIN STREET NW", 105, 108),
            segment(2, "MAIN STREET NW", 200, 210),
        ]);

        // exact
        assert_eq!(
            resolver.resolve("106 BLOCK OF MAIN STREET NW", &index),
            MatchResult::Matched(1)
        );
        // +5 only
        assert_eq!(
            resolver.resolve("195 BLOCK OF MAIN STREET NW", &index),
            MatchResult::Matched(2)
        );
        // -5 only: 110 and 115 miss, 105 hits
        assert_eq!(
            resolver.resolve("110 BLOCK OF MAIN STREET NW", &index),
            MatchResult::Matched(1)
        );
        // every attempt misses
        assert_eq!(
            resolver.resolve("150 BLOCK OF MAIN STREET NW", &index),
            MatchResult::UnmatchableBlock
        );
    }

    #[test]
    fn test_plus_retry_wins_over_minus() {
        let resolver = BlockResolver::new().unwrap();
        let index = index(vec![
            segment(1, "MAIN STREET NW", 90, 95),
            segment(2, "MAIN STREET NW", 105, 110),
        ]);
        assert_eq!(
            resolver.resolve("100 BLOCK OF MAIN STREET NW", &index),
            MatchResult::Matched(2)
        );
    }

    #[test]
    fn test_zero_offset_disables_retries() {
        let resolver = BlockResolver::with_config(ResolverConfig { fuzzy_offset: 0 }).unwrap();
        let index = index(vec![segment(1, "MAIN STREET NW", 105, 108)]);
        assert_eq!(
            resolver.resolve("110 BLOCK OF MAIN STREET NW", &index),
            MatchResult::UnmatchableBlock
        );
    }

    #[test]
    fn test_huge_block_number_is_unmatchable() {
        let resolver = BlockResolver::new().unwrap();
        let index = index(vec![segment(1, "MAIN STREET NW", 0, i64::MAX)]);
        assert_eq!(
            resolver.resolve("99999999999999999999999 BLOCK OF MAIN STREET NW", &index),
            MatchResult::UnmatchableBlock
        );
        assert_eq!(
            resolver.resolve(&format!("{} BLOCK OF MAIN STREET NW", i64::MAX), &index),
            MatchResult::Matched(1)
        );
    }

    #[test]
    fn test_ambiguity_is_reported() {
        let resolver = BlockResolver::new().unwrap();
        let index = index(vec![
            segment(7, "MAIN STREET NW", 100, 198),
            segment(3, "MAIN STREET NW", 150, 250),
        ]);
        let resolution = resolver.resolve_detailed("160 BLOCK OF MAIN STREET NW", &index);
        assert_eq!(resolution.result, MatchResult::Matched(3));
        assert_eq!(resolution.candidates, 2);
        assert!(resolution.is_ambiguous());
    }

    #[test]
    fn test_corner_and_other() {
        let resolver = BlockResolver::new().unwrap();
        let mut k_street = segment(1, "K STREET NW", 700, 798);
        k_street.from_street = Some("7TH STREET NW".to_string());
        let index = index(vec![k_street]);

        assert_eq!(
            resolver.resolve("K STREET NW & 7TH STREET NW", &index),
            MatchResult::Matched(1)
        );
        assert_eq!(
            resolver.resolve("7TH STREET NW / K STREET NW", &index),
            MatchResult::Matched(1)
        );
        assert_eq!(
            resolver.resolve("K STREET NW & 9TH STREET NW", &index),
            MatchResult::UnmatchableCorner
        );
        assert_eq!(
            resolver.resolve("SOMEWHERE IN THE CITY", &index),
            MatchResult::OtherUnmatchable
        );
    }
}
