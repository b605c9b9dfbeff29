//! Address normalization
//!
//! Rewrites a raw, human-entered address into the spelling the reference
//! table uses. The pipeline runs six stages in a fixed order; see [`Stage`].
//! Normalization is total: text that no rule recognizes passes through
//! unchanged and is classified as unmatchable later.

pub mod rules;
pub mod tables;

use crate::config::NormalizerConfig;
use crate::error::Result;
use regex::Regex;
use rules::{apply_each, apply_first, compile, Rewrite};
use std::fmt;

/// Normalization stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `B/O` expanded to `BLOCK OF`
    BlockOf,
    /// Ordered spelling corrections
    Spelling,
    /// City/state text after the quadrant removed
    Ending,
    /// Final street type expanded
    StreetType,
    /// Street type before a corner marker expanded
    CornerStreetType,
    /// Deletions, ordinals, quadrants, unit blocks and spot fixes
    Cleanup,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 6] = [
        Stage::BlockOf,
        Stage::Spelling,
        Stage::Ending,
        Stage::StreetType,
        Stage::CornerStreetType,
        Stage::Cleanup,
    ];

    /// Short name used in traces
    pub fn name(self) -> &'static str {
        match self {
            Stage::BlockOf => "block-of",
            Stage::Spelling => "spelling",
            Stage::Ending => "ending",
            Stage::StreetType => "street-type",
            Stage::CornerStreetType => "corner-street-type",
            Stage::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiled normalization pipeline
///
/// Construction compiles every rule once; [`normalize`](Self::normalize) then
/// only reads, so one normalizer can be shared across threads.
#[derive(Debug, Clone)]
pub struct AddressNormalizer {
    spelling: Vec<Rewrite>,
    quadrant_end: Regex,
    trailing_text: Rewrite,
    street_types: Vec<Rewrite>,
    corner: Regex,
    corner_street_types: Vec<Rewrite>,
    deletions: Vec<Rewrite>,
    capitol_street: Rewrite,
    capitol_quadrant: Rewrite,
    ordinals: Vec<Rewrite>,
    leading_ordinal: Rewrite,
    trailing_ordinal: Rewrite,
    unit_block: Rewrite,
    overrides: Vec<(String, String)>,
}

impl AddressNormalizer {
    /// Build the normalizer from the built-in tables
    pub fn new() -> Result<Self> {
        Self::with_config(&NormalizerConfig::default())
    }

    /// Build the normalizer from the built-in tables plus configured extensions
    pub fn with_config(config: &NormalizerConfig) -> Result<Self> {
        let builtin = tables::SPELLING_CORRECTIONS
            .iter()
            .map(|&(from, to)| Rewrite::correction(from, to));
        let extra = config
            .extra_corrections
            .iter()
            .map(|r| Rewrite::correction(&r.from, &r.to));
        let spelling = builtin.chain(extra).collect::<Result<Vec<_>>>()?;

        let street_types = tables::STREET_TYPES
            .iter()
            .map(|&(abbr, full)| Rewrite::street_type(abbr, full))
            .collect::<Result<Vec<_>>>()?;
        let corner_street_types = tables::STREET_TYPES
            .iter()
            .map(|&(abbr, full)| Rewrite::corner_street_type(abbr, full))
            .collect::<Result<Vec<_>>>()?;
        let deletions = tables::DELETIONS
            .iter()
            .map(|pattern| Rewrite::deletion(pattern))
            .collect::<Result<Vec<_>>>()?;
        let ordinals = tables::ORDINAL_SUFFIXES
            .iter()
            .map(|&(digits, suffix)| Rewrite::ordinal(digits, suffix))
            .collect::<Result<Vec<_>>>()?;

        let overrides = tables::SPOT_FIXES
            .iter()
            .map(|&(from, to)| (from.to_string(), to.to_string()))
            .chain(
                config
                    .extra_overrides
                    .iter()
                    .map(|r| (r.from.clone(), r.to.clone())),
            )
            .collect();

        Ok(Self {
            spelling,
            quadrant_end: compile(r" [NS][EW]$")?,
            trailing_text: Rewrite::new(r"^(.* [NS][EW]) .*$", "${1}")?,
            street_types,
            corner: compile(r"^(.*) [&/] (.*)$")?,
            corner_street_types,
            deletions,
            capitol_street: Rewrite::new(r"^(.* CAPITOL ST)$", "${1}REET")?,
            capitol_quadrant: Rewrite::new(r"^(.* CAPITOL STREET) [NS][WE]$", "${1}")?,
            ordinals,
            leading_ordinal: Rewrite::new(
                r"^([0-9]{1,2}[SNRT][TDH])( ?[NS]?[EW]? [&/] .*)",
                "${1} STREET${2}",
            )?,
            trailing_ordinal: Rewrite::new(
                r"^(.*[0-9]{1,2}[SNRT][TDH])( [NS][EW]$)",
                "${1} STREET${2}",
            )?,
            unit_block: Rewrite::new(r"^UNIT (BLOCK OF.*)$", "0 ${1}")?,
            overrides,
        })
    }

    /// Normalize a raw address
    pub fn normalize(&self, raw: &str) -> String {
        self.run(raw, |_, _| {})
    }

    /// Normalize a raw address, recording the text after each stage
    pub fn normalize_trace(&self, raw: &str) -> Vec<(Stage, String)> {
        let mut trace = Vec::with_capacity(Stage::ALL.len());
        self.run(raw, |stage, text| trace.push((stage, text.to_string())));
        trace
    }

    fn run(&self, raw: &str, mut observe: impl FnMut(Stage, &str)) -> String {
        let address = raw.replace(" B/O ", " BLOCK OF ");
        observe(Stage::BlockOf, &address);

        let address = apply_each(&self.spelling, address);
        observe(Stage::Spelling, &address);

        let address = self.trim_ending(address);
        observe(Stage::Ending, &address);

        let address = apply_first(&self.street_types, address);
        observe(Stage::StreetType, &address);

        let address = if self.corner.is_match(&address) {
            apply_first(&self.corner_street_types, address)
        } else {
            address
        };
        observe(Stage::CornerStreetType, &address);

        let address = self.clean(address);
        observe(Stage::Cleanup, &address);

        address
    }

    /// Drop text such as " WASHINGTON DC" that follows the quadrant
    fn trim_ending(&self, address: String) -> String {
        if address.contains("CAPITOL") || self.quadrant_end.is_match(&address) {
            return address;
        }
        self.trailing_text.apply(&address).unwrap_or(address)
    }

    fn clean(&self, address: String) -> String {
        let address = apply_each(&self.deletions, address);

        // North, South and East Capitol bound the quadrants and carry none
        let address = self.capitol_street.apply(&address).unwrap_or(address);
        let address = self.capitol_quadrant.apply(&address).unwrap_or(address);

        let address = apply_first(&self.ordinals, address);
        let address = self.leading_ordinal.apply(&address).unwrap_or(address);
        let address = self.trailing_ordinal.apply(&address).unwrap_or(address);

        let address = self.backfill_quadrant(address);
        let address = self.unit_block.apply(&address).unwrap_or(address);

        self.apply_override(address)
    }

    /// Copy the quadrant of one corner street onto the other when only one
    /// side names it
    fn backfill_quadrant(&self, address: String) -> String {
        let sides = self
            .corner
            .captures(&address)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()));
        let Some((first, second)) = sides else {
            return address;
        };
        if first.contains(" CAPITOL ") || second.contains(" CAPITOL ") {
            return address;
        }

        let quadrant = |side: &str| self.quadrant_end.find(side).map(|m| m.as_str().to_string());
        match (quadrant(&first), quadrant(&second)) {
            (None, Some(q)) => format!("{first}{q} & {second}"),
            (Some(q), None) => format!("{first} & {second}{q}"),
            _ => address,
        }
    }

    fn apply_override(&self, address: String) -> String {
        match self.overrides.iter().find(|(from, _)| *from == address) {
            Some((_, to)) => to.clone(),
            None => address,
        }
    }
}
