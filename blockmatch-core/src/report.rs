//! Match-rate diagnostics grouped by the shape of the original address

use crate::resolver::Resolution;
use crate::types::{AddressShape, MatchCode, MatchResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome counts for one category of addresses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    counts: BTreeMap<MatchCode, usize>,
    total: usize,
}

impl CategoryStats {
    fn record(&mut self, code: MatchCode) {
        *self.counts.entry(code).or_default() += 1;
        self.total += 1;
    }

    fn merge(&mut self, other: &CategoryStats) {
        for (&code, &count) in &other.counts {
            *self.counts.entry(code).or_default() += count;
        }
        self.total += other.total;
    }

    /// Number of records with the given outcome
    pub fn count(&self, code: MatchCode) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Number of records in the category
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of matched records
    pub fn matched(&self) -> usize {
        self.count(MatchCode::Matched)
    }

    /// `matched / total`, or `None` for an empty category
    pub fn match_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.matched() as f64 / self.total as f64)
    }
}

/// Failure codes whose normalized addresses are tallied for rule tuning
const TALLIED_CODES: [MatchCode; 3] = [
    MatchCode::UnmatchableBlock,
    MatchCode::UnmatchableCorner,
    MatchCode::OtherUnmatchable,
];

/// Aggregated match outcomes per address shape and overall
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchReport {
    categories: BTreeMap<AddressShape, CategoryStats>,
    overall: CategoryStats,
    ambiguous_lookups: usize,
    // Full counts; only the capped view from `details` is serialized
    #[serde(skip)]
    unmatched: BTreeMap<MatchCode, BTreeMap<String, usize>>,
}

impl MatchReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome for a record whose raw address had `shape`
    pub fn record(&mut self, shape: AddressShape, result: MatchResult) {
        let code = result.code();
        self.categories.entry(shape).or_default().record(code);
        self.overall.record(code);
    }

    /// Record a resolution, counting it as ambiguous when several segments
    /// satisfied the lookup
    pub fn record_resolution(&mut self, shape: AddressShape, resolution: &Resolution) {
        self.record(shape, resolution.result);
        if resolution.is_ambiguous() {
            self.ambiguous_lookups += 1;
        }
    }

    /// Record a resolution along with the normalized address it came from.
    /// Unmatchable addresses are tallied per failure code.
    pub fn record_address(
        &mut self,
        shape: AddressShape,
        normalized: &str,
        resolution: &Resolution,
    ) {
        self.record_resolution(shape, resolution);
        let code = resolution.result.code();
        if TALLIED_CODES.contains(&code) {
            *self
                .unmatched
                .entry(code)
                .or_default()
                .entry(normalized.to_string())
                .or_default() += 1;
        }
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: &MatchReport) {
        for (&shape, stats) in &other.categories {
            self.categories.entry(shape).or_default().merge(stats);
        }
        self.overall.merge(&other.overall);
        self.ambiguous_lookups += other.ambiguous_lookups;
        for (&code, addresses) in &other.unmatched {
            let counts = self.unmatched.entry(code).or_default();
            for (address, &count) in addresses {
                *counts.entry(address.clone()).or_default() += count;
            }
        }
    }

    /// Combine two reports
    pub fn merged(mut self, other: MatchReport) -> MatchReport {
        self.merge(&other);
        self
    }

    /// Statistics for one shape category
    pub fn category(&self, shape: AddressShape) -> CategoryStats {
        self.categories.get(&shape).cloned().unwrap_or_default()
    }

    /// Statistics over every record
    pub fn overall(&self) -> &CategoryStats {
        &self.overall
    }

    /// Lookups that returned more than one segment and took the lowest id
    pub fn ambiguous_lookups(&self) -> usize {
        self.ambiguous_lookups
    }

    /// Number of records seen
    pub fn total(&self) -> usize {
        self.overall.total
    }

    /// How often `normalized` failed with `code`
    pub fn unmatched_count(&self, code: MatchCode, normalized: &str) -> usize {
        self.unmatched
            .get(&code)
            .and_then(|counts| counts.get(normalized))
            .copied()
            .unwrap_or(0)
    }

    /// The `limit` most frequent unmatched addresses for each failure code,
    /// most frequent first and alphabetical among equal counts
    pub fn details(&self, limit: usize) -> UnmatchedAddresses {
        let codes = self
            .unmatched
            .iter()
            .map(|(&code, counts)| {
                let mut top: Vec<AddressCount> = counts
                    .iter()
                    .map(|(address, &count)| AddressCount {
                        address: address.clone(),
                        count,
                    })
                    .collect();
                top.sort_by(|a, b| {
                    b.count
                        .cmp(&a.count)
                        .then_with(|| a.address.cmp(&b.address))
                });
                top.truncate(limit);
                let list = UnmatchedList {
                    distinct: counts.len(),
                    top,
                };
                (code, list)
            })
            .collect();
        UnmatchedAddresses { codes }
    }

    /// Emit the summary through the `log` facade
    pub fn log_summary(&self) {
        for shape in AddressShape::ALL {
            let stats = self.category(shape);
            if let Some(rate) = stats.match_rate() {
                log::info!(
                    "{} pattern: {:.4} ({}/{})",
                    shape,
                    rate,
                    stats.matched(),
                    stats.total()
                );
            }
        }
        if let Some(rate) = self.overall.match_rate() {
            log::info!(
                "overall: {:.4} ({}/{}), {} ambiguous lookups",
                rate,
                self.overall.matched(),
                self.overall.total,
                self.ambiguous_lookups
            );
        }
    }
}

fn write_stats(f: &mut fmt::Formatter<'_>, name: &str, stats: &CategoryStats) -> fmt::Result {
    match stats.match_rate() {
        Some(rate) => writeln!(
            f,
            "{name}: {:.2}% matched ({}/{})",
            rate * 100.0,
            stats.matched(),
            stats.total()
        )?,
        None => writeln!(f, "{name}: no records")?,
    }
    for code in MatchCode::ALL {
        let count = stats.count(code);
        if code != MatchCode::Matched && count > 0 {
            writeln!(f, "  {code}: {count}")?;
        }
    }
    Ok(())
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shape in AddressShape::ALL {
            write_stats(f, &format!("{shape} pattern"), &self.category(shape))?;
        }
        write_stats(f, "Overall", &self.overall)?;
        write!(f, "Ambiguous lookups: {}", self.ambiguous_lookups)
    }
}

/// One normalized address and how many records carried it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressCount {
    /// Normalized address
    pub address: String,
    /// Number of records
    pub count: usize,
}

/// Capped frequency list for one failure code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedList {
    /// Number of distinct addresses before capping
    pub distinct: usize,
    /// Most frequent addresses
    pub top: Vec<AddressCount>,
}

/// Most frequent unmatched addresses per failure code, see
/// [`MatchReport::details`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnmatchedAddresses {
    codes: BTreeMap<MatchCode, UnmatchedList>,
}

impl UnmatchedAddresses {
    /// The list for one failure code, if any address failed with it
    pub fn get(&self, code: MatchCode) -> Option<&UnmatchedList> {
        self.codes.get(&code)
    }

    /// Whether no address was tallied
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl fmt::Display for UnmatchedAddresses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.codes.is_empty() {
            return writeln!(f, "Unmatched addresses: none");
        }
        writeln!(f, "Most frequent unmatched addresses:")?;
        for (code, list) in &self.codes {
            writeln!(f, "  {} ({} distinct)", code.label(), list.distinct)?;
            for entry in &list.top {
                writeln!(f, "    {:>6}  {}", entry.count, entry.address)?;
            }
            let hidden = list.distinct - list.top.len();
            if hidden > 0 {
                writeln!(f, "    ... {hidden} more")?;
            }
        }
        Ok(())
    }
}
