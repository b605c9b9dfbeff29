//! Batch matching: normalize, resolve, and join coordinates over many records

use crate::config::{ExecutionConfig, ExecutionMode, MatcherConfig};
use crate::error::Result;
use crate::index::ReferenceIndex;
use crate::normalizer::AddressNormalizer;
use crate::report::MatchReport;
use crate::resolver::{BlockResolver, Resolution};
use crate::types::{AddressShape, MatchCode, MatchResult, Point, SegmentId};
use std::sync::Arc;

/// Result of matching one raw address
#[derive(Debug, Clone, PartialEq)]
pub struct Geocode {
    /// Normalized form of the address
    pub normalized: String,
    /// Shape of the raw address, used for reporting
    pub shape: AddressShape,
    /// Match outcome
    pub result: MatchResult,
    /// Segments that satisfied the successful lookup
    pub candidates: usize,
    /// Coordinates of the matched segment
    pub point: Option<Point>,
}

impl Geocode {
    /// Outcome code
    pub fn code(&self) -> MatchCode {
        self.result.code()
    }

    /// Matched segment id
    pub fn block_id(&self) -> Option<SegmentId> {
        self.result.block_id()
    }

    fn resolution(&self) -> Resolution {
        Resolution {
            result: self.result,
            candidates: self.candidates,
        }
    }
}

/// Output of a batch run
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// One geocode per input, in input order
    pub records: Vec<Geocode>,
    /// Aggregated diagnostics
    pub report: MatchReport,
    /// Execution mode actually used
    pub mode: ExecutionMode,
}

/// Runs the full matching pipeline over batches of raw addresses
///
/// The normalizer and index are shared read-only between workers, so the
/// matcher can be used from several threads at once.
#[derive(Debug, Clone)]
pub struct BatchMatcher {
    normalizer: AddressNormalizer,
    resolver: BlockResolver,
    index: Arc<ReferenceIndex>,
    execution: ExecutionConfig,
}

impl BatchMatcher {
    /// Create a matcher with default configuration
    pub fn new(index: Arc<ReferenceIndex>) -> Result<Self> {
        Self::with_config(index, &MatcherConfig::default())
    }

    /// Create a matcher with custom configuration
    pub fn with_config(index: Arc<ReferenceIndex>, config: &MatcherConfig) -> Result<Self> {
        Ok(Self {
            normalizer: AddressNormalizer::with_config(&config.normalizer)?,
            resolver: BlockResolver::with_config(config.resolver)?,
            index,
            execution: config.execution,
        })
    }

    /// Match a single raw address
    pub fn match_one(&self, raw: &str) -> Geocode {
        let normalized = self.normalizer.normalize(raw);
        let resolution = self.resolver.resolve_detailed(&normalized, &self.index);
        let point = resolution
            .result
            .block_id()
            .and_then(|id| self.index.point(id));

        if !resolution.result.is_matched() {
            log::trace!("{:?} -> {:?}: {}", raw, normalized, resolution.result.code());
        }

        Geocode {
            normalized,
            shape: AddressShape::classify(raw),
            result: resolution.result,
            candidates: resolution.candidates,
            point,
        }
    }

    /// Match a batch, preserving input order
    pub fn match_batch<S>(&self, raws: &[S]) -> Result<BatchOutput>
    where
        S: AsRef<str> + Sync,
    {
        let mode = self
            .execution
            .mode
            .select(raws.len(), self.execution.parallel_threshold);
        log::debug!("matching {} records ({:?})", raws.len(), mode);

        let (records, report) = match mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => self.run_parallel(raws)?,
            _ => self.run_sequential(raws),
        };

        Ok(BatchOutput {
            records,
            report,
            mode,
        })
    }

    fn run_sequential<S: AsRef<str>>(&self, raws: &[S]) -> (Vec<Geocode>, MatchReport) {
        let mut report = MatchReport::new();
        let records = raws
            .iter()
            .map(|raw| {
                let geocode = self.match_one(raw.as_ref());
                report.record_address(
                    geocode.shape,
                    &geocode.normalized,
                    &geocode.resolution(),
                );
                geocode
            })
            .collect();
        (records, report)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<S>(&self, raws: &[S]) -> Result<(Vec<Geocode>, MatchReport)>
    where
        S: AsRef<str> + Sync,
    {
        use crate::error::CoreError;
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads())
            .thread_name(|i| format!("blockmatch-worker-{i}"))
            .build()
            .map_err(|e| CoreError::Parallel(e.to_string()))?;

        Ok(pool.install(|| {
            let records: Vec<Geocode> = raws
                .par_iter()
                .map(|raw| self.match_one(raw.as_ref()))
                .collect();

            let report = records
                .par_iter()
                .fold(MatchReport::new, |mut report, geocode| {
                    report.record_address(
                        geocode.shape,
                        &geocode.normalized,
                        &geocode.resolution(),
                    );
                    report
                })
                .reduce(MatchReport::new, MatchReport::merged);

            (records, report)
        }))
    }

    /// Worker threads used for parallel runs
    #[cfg(feature = "parallel")]
    pub fn threads(&self) -> usize {
        match self.execution.threads {
            0 => num_cpus::get(),
            n => n,
        }
    }

    /// The normalizer in use
    pub fn normalizer(&self) -> &AddressNormalizer {
        &self.normalizer
    }

    /// The resolver in use
    pub fn resolver(&self) -> &BlockResolver {
        &self.resolver
    }

    /// The reference index
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }
}
