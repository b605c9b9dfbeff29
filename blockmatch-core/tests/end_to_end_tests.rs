//! End-to-end tests for the normalize -> resolve -> join pipeline

use blockmatch_core::{
    AddressNormalizer, AddressShape, BatchMatcher, BlockResolver, BlockSegment, ExecutionMode,
    MatchCode, MatchResult, MatcherConfig, Point, ReferenceIndex,
};
use std::sync::Arc;

fn segment(
    id: i64,
    on: &str,
    from: Option<&str>,
    to: Option<&str>,
    low: i64,
    high: i64,
) -> BlockSegment {
    BlockSegment {
        id,
        on_street: on.to_string(),
        from_street: from.map(str::to_string),
        to_street: to.map(str::to_string),
        low,
        high,
        point: Point::new(id as f64, 38.9),
    }
}

fn reference() -> Arc<ReferenceIndex> {
    Arc::new(
        ReferenceIndex::build(vec![
            segment(
                1,
                "MAIN STREET NW",
                Some("1ST STREET NW"),
                Some("2ND STREET NW"),
                100,
                198,
            ),
            segment(2, "K STREET NW", Some("7TH STREET NW"), None, 700, 798),
            segment(3, "BENNING ROAD SE", None, None, 4510, 4598),
            segment(4, "MARTIN LUTHER KING JR AVENUE SE", None, None, 1500, 1598),
            segment(5, "SIDE STREET NE", None, None, 105, 108),
        ])
        .unwrap(),
    )
}

#[test]
fn test_block_of_in_and_out_of_range() {
    let matcher = BatchMatcher::new(reference()).unwrap();

    let inside = matcher.match_one("150 BLOCK OF MAIN STREET NW");
    assert_eq!(inside.result, MatchResult::Matched(1));
    assert_eq!(inside.point, Some(Point::new(1.0, 38.9)));

    let outside = matcher.match_one("500 BLOCK OF MAIN STREET NW");
    assert_eq!(outside.result, MatchResult::UnmatchableBlock);
    assert_eq!(outside.point, None);
}

#[test]
fn test_minus_retry_reaches_range() {
    let matcher = BatchMatcher::new(reference()).unwrap();
    assert_eq!(
        matcher.match_one("110 BLOCK OF SIDE ST NE").result,
        MatchResult::Matched(5)
    );
}

#[test]
fn test_raw_abbreviations_and_trailing_city() {
    let matcher = BatchMatcher::new(reference()).unwrap();

    let geocode = matcher.match_one("150 B/O MAIN ST NW WASHINGTON DC 20001");
    assert_eq!(geocode.normalized, "150 BLOCK OF MAIN STREET NW");
    assert_eq!(geocode.block_id(), Some(1));

    let geocode = matcher.match_one("1500 B/O MLK AVE SE");
    assert_eq!(
        geocode.normalized,
        "1500 BLOCK OF MARTIN LUTHER KING JR AVENUE SE"
    );
    assert_eq!(geocode.block_id(), Some(4));
}

#[test]
fn test_corner_symmetry() {
    let matcher = BatchMatcher::new(reference()).unwrap();
    let forward = matcher.match_one("K ST NW & 7TH ST NW");
    let backward = matcher.match_one("7TH ST NW / K ST NW");
    assert_eq!(forward.result, MatchResult::Matched(2));
    assert_eq!(forward.result, backward.result);
    assert_eq!(forward.shape, AddressShape::Corner);
}

#[test]
fn test_corner_quadrant_backfill() {
    let normalizer = AddressNormalizer::new().unwrap();
    assert_eq!(
        normalizer.normalize("7TH ST & K ST NW"),
        "7TH STREET NW & K STREET NW"
    );

    let matcher = BatchMatcher::new(reference()).unwrap();
    assert_eq!(
        matcher.match_one("7TH ST & K ST NW").result,
        MatchResult::Matched(2)
    );
}

#[test]
fn test_spot_fixes() {
    let normalizer = AddressNormalizer::new().unwrap();
    let cases = [
        ("4500 BLOCK OF BENNING RD SE", "4510 BLOCK OF BENNING ROAD SE"),
        ("1100 B/O HOWARD RD SE", "1007 BLOCK OF HOWARD ROAD SE"),
        ("1400 BLOCK OF CEDAR ST SE", "1424 BLOCK OF CEDAR STREET SE"),
        ("4400 BLOCK OF WATER ST NW", "3599 BLOCK OF WATER STREET NW"),
        ("2700 BLOCK OF DOUGLASS PL SE", "2657 BLOCK OF DOUGLASS PLACE SE"),
    ];
    for (raw, expected) in cases {
        assert_eq!(normalizer.normalize(raw), expected, "input: {raw}");
    }

    // 4500 and both retries miss the 4510 range, the override does not
    let matcher = BatchMatcher::new(reference()).unwrap();
    assert_eq!(
        matcher.match_one("4500 BLOCK OF BENNING RD SE").result,
        MatchResult::Matched(3)
    );
}

#[test]
fn test_missing_and_sentinel_before_shape() {
    let index = reference();
    let resolver = BlockResolver::new().unwrap();
    assert_eq!(resolver.resolve("", &index), MatchResult::AddressMissing);
    assert_eq!(
        resolver.resolve("Multiple/Unknown Address", &index),
        MatchResult::MultipleOrUnknownAddress
    );
}

#[test]
fn test_batch_report() {
    let mut config = MatcherConfig::default();
    config.execution.mode = ExecutionMode::Sequential;
    let matcher = BatchMatcher::with_config(reference(), &config).unwrap();

    let output = matcher
        .match_batch(&[
            "150 BLOCK OF MAIN ST NW",
            "500 BLOCK OF MAIN ST NW",
            "K ST & 9TH ST NW",
            "",
        ])
        .unwrap();

    let codes: Vec<MatchCode> = output.records.iter().map(|g| g.code()).collect();
    assert_eq!(
        codes,
        vec![
            MatchCode::Matched,
            MatchCode::UnmatchableBlock,
            MatchCode::UnmatchableCorner,
            MatchCode::AddressMissing,
        ]
    );

    let block_of = output.report.category(AddressShape::BlockOf);
    assert_eq!(block_of.match_rate(), Some(0.5));
    assert_eq!(output.report.category(AddressShape::Corner).match_rate(), Some(0.0));
    assert_eq!(output.report.overall().total(), 4);
}
