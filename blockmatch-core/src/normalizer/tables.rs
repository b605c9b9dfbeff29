//! Static rewrite tables
//!
//! Every table is an ordered slice. Rules are applied in slice order and
//! earlier rewrites can enable or block later ones, so entries must not be
//! reordered or deduplicated.

/// Misspellings and shorthand observed in the source data, with corrections.
/// A misspelling only matches when preceded by a space.
pub const SPELLING_CORRECTIONS: &[(&str, &str)] = &[
    ("CAPTIOL", "CAPITOL"),
    ("CAPITAL", "CAPITOL"),
    ("ILINOI", "ILLINOIS"),
    ("/ SCAPITOL", "SOUTH CAPITOL"),
    ("13'TH", "13TH"),
    ("EAST CAP ST", "EAST CAPITOL ST"),
    ("E CAPITOL", "EAST CAPITOL"),
    ("MLK JR", "MARTIN LUTHER KING JR"),
    ("CAPITOL / 295N", "CAPITOL STREET"),
    ("MLKJR", "MARTIN LUTHER KING JR"),
    ("MT PLEASANT", "MOUNT PLEASANT"),
    ("MARTIN LUTHER KING AV", "MARTIN LUTHER KING JR AV"),
    ("MLK AV", "MARTIN LUTHER KING JR AV"),
    ("4ST", "4TH STREET"),
    ("7TH T", "7TH STREET"),
    ("V STNW", "V ST NW"),
    ("N CAPITOL ST", "NORTH CAPITOL ST"),
    ("RI AV", "RHODE ISLAND AV"),
    ("N / W", "NW"),
    ("GA AV", "GEORGIA AV"),
    ("MD AV", "MARYLAND AV"),
    ("AVENW", "AVE NW"),
    ("PA AV", "PENNSYLVANIA AV"),
    ("STNW", "ST NW"),
    ("NORTH CAPITOL NE", "NORTH CAPITOL STREET"),
    ("19THST", "19TH STREET"),
    ("NEW YORK AVENE NE", "NEW YORK AVENUE NE"),
    ("ST;NW", "ST NW"),
    ("13 TH", "13TH"),
    ("N CAP ST", "NORTH CAPITOL ST"),
    ("ECAPITAL ST", "EAST CAPITOL ST"),
    ("BLK OF", "BLOCK OF"),
    ("BLK", "BLOCK OF"),
];

/// Street-type abbreviations and the full words used by the reference table.
/// `AVE` precedes `AV` so that `AVE` is not read as `AV` plus a stray `E`.
pub const STREET_TYPES: &[(&str, &str)] = &[
    ("ALY", "ALLEY"),
    ("AVE", "AVENUE"),
    ("AV", "AVENUE"),
    ("BLVD", "BOULEVARD"),
    ("BRG", "BRIDGE"),
    ("CIR", "CIRCLE"),
    ("CT", "COURT"),
    ("CRES", "CRESCENT"),
    ("DR", "DRIVE"),
    ("EXPY", "EXPRESSWAY"),
    ("FWY", "FREEWAY"),
    ("GDN", "GARDENS"),
    ("GDNS", "GARDENS"),
    ("GRN", "GREEN"),
    ("KYS", "KEYS"),
    ("LN", "LANE"),
    ("LOOP", "LOOP"),
    ("MEWS", "MEWS"),
    ("PKWY", "PARKWAY"),
    ("PL", "PLACE"),
    ("PLZ", "PLAZA"),
    ("RD", "ROAD"),
    ("ROW", "ROW"),
    ("SQ", "SQUARE"),
    ("ST", "STREET"),
    ("TER", "TERRACE"),
    ("TR", "TERRACE"),
    ("WALK", "WALK"),
    ("WAY", "WAY"),
];

/// Whole-string patterns whose two capture groups are kept and concatenated,
/// deleting whatever lay between them.
pub const DELETIONS: &[&str] = &[
    r"^(.* [0-9]TH)S( .*)$",
    r"^(.*)\.( [NS][WE])$",
    r"^(.* BLOCK OF) .* [NS][WE] /( .*[NS][WE])$",
    r"^(.* BLOCK OF )OF (.*[NS][WE])$",
    r"^(.* BLOCK OF )BLOCK OF (.*[NS][WE])$",
    r"^(.* BLOCK OF )BLK OF (.*[NS][WE])$",
    r"^(.* BLOCK OF )BLOCK (.*[NS][WE])$",
];

/// Ordinal suffixes for bare numbered streets, keyed on the literal digits
/// following `BLOCK OF`. Only the first matching entry applies.
pub const ORDINAL_SUFFIXES: &[(&str, &str)] = &[
    ("1", "ST"),
    ("2", "ND"),
    ("3", "RD"),
    ("[4-9]", "TH"),
    ("[1-9][0-9]", "TH"),
];

/// Exact-match corrections for blocks whose reported number places them in
/// the wrong segment.
pub const SPOT_FIXES: &[(&str, &str)] = &[
    (
        "4500 BLOCK OF BENNING ROAD SE",
        "4510 BLOCK OF BENNING ROAD SE",
    ),
    ("1100 BLOCK OF HOWARD ROAD SE", "1007 BLOCK OF HOWARD ROAD SE"),
    ("1400 BLOCK OF CEDAR STREET SE", "1424 BLOCK OF CEDAR STREET SE"),
    ("4400 BLOCK OF WATER STREET NW", "3599 BLOCK OF WATER STREET NW"),
    (
        "2700 BLOCK OF DOUGLASS PLACE SE",
        "2657 BLOCK OF DOUGLASS PLACE SE",
    ),
];

/// Sentinel the source data uses for records without a single location
pub const UNKNOWN_ADDRESS: &str = "Multiple/Unknown Address";
