//! Match command implementation

use super::init_logging;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{load_reference, resolve_patterns, FileReader, RecordSet};
use crate::output::{
    CsvFormatter, GeoJsonFormatter, JsonFormatter, MatchedRecord, OutputFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use blockmatch_core::{
    BatchMatcher, ExecutionMode, MatchReport, MatcherConfig, UnmatchedAddresses,
};
use serde::Serialize;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the match command
#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Input CSV files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Reference block table (CSV)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub reference: PathBuf,

    /// Input column holding the raw address [default: block_address]
    #[arg(short = 'c', long, value_name = "COLUMN")]
    pub column: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the match-rate summary as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// List the N most frequent unmatched addresses per failure code [default: 20]
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "20")]
    pub details: Option<usize>,

    /// House-number offset for block retries (0 disables)
    #[arg(long, value_name = "N")]
    pub fuzzy_offset: Option<u32>,

    /// Force parallel processing even for small inputs
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output and the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Input columns plus match columns
    Csv,
    /// JSON array of records
    Json,
    /// FeatureCollection of matched records
    Geojson,
}

impl MatchArgs {
    /// Execute the match command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting block matching");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let format = self.output_format(&config)?;
        let column = self
            .column
            .clone()
            .unwrap_or_else(|| config.processing.address_column.clone());

        let index = Arc::new(load_reference(&self.reference)?);
        let matcher = BatchMatcher::with_config(index, &self.matcher_config(&config))
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} input files", files.len());

        let mut formatter = self.create_formatter(format, &config)?;
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let mut report = MatchReport::new();
        let mut headers: Option<Vec<String>> = None;

        for path in &files {
            let size = FileReader::file_size(path)?;
            let records = RecordSet::from_path(path, &column)?;
            log::debug!(
                "{}: {} bytes, {} records",
                path.display(),
                size,
                records.len()
            );

            if let Some(first) = &headers {
                if *first != records.headers {
                    return Err(CliError::HeaderMismatch(path.display().to_string()).into());
                }
            } else {
                formatter.begin(&records.headers)?;
                headers = Some(records.headers.clone());
            }

            let addresses = records.addresses();
            let output = matcher
                .match_batch(&addresses)
                .with_context(|| format!("Failed to match {}", path.display()))?;
            log::debug!("{}: matched in {:?} mode", path.display(), output.mode);

            for (fields, geocode) in records.rows.iter().zip(&output.records) {
                formatter.format_record(&MatchedRecord { fields, geocode })?;
            }

            progress.file_completed(
                &path.display().to_string(),
                output.report.overall().matched(),
                output.report.total(),
            );
            report.merge(&output.report);
        }

        formatter.finish()?;
        progress.finish();

        report.log_summary();
        let details = self.details.map(|limit| report.details(limit));
        if !self.quiet {
            eprintln!("{report}");
            if let Some(details) = &details {
                eprint!("{details}");
            }
        }
        if let Some(path) = &self.report {
            write_report(path, &report, details.as_ref())?;
        }

        Ok(())
    }

    fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_str(&config.output.default_format, true).map_err(|_| {
                CliError::ConfigError(format!(
                    "unknown output format '{}'",
                    config.output.default_format
                ))
                .into()
            }),
        }
    }

    /// Configuration file values with command-line overrides applied
    fn matcher_config(&self, config: &CliConfig) -> MatcherConfig {
        let mut matcher = config.matcher_config();
        if self.parallel {
            matcher.execution.mode = ExecutionMode::Parallel;
        }
        if let Some(threads) = self.threads {
            matcher.execution.threads = threads;
        }
        if let Some(offset) = self.fuzzy_offset {
            matcher.resolver.fuzzy_offset = offset;
        }
        matcher
    }

    fn create_formatter(
        &self,
        format: OutputFormat,
        config: &CliConfig,
    ) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        let include_normalized = config.output.include_normalized;
        let pretty = config.output.pretty_json;
        let formatter: Box<dyn OutputFormatter> = match format {
            OutputFormat::Csv => Box::new(CsvFormatter::new(writer, include_normalized)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty, include_normalized)),
            OutputFormat::Geojson => Box::new(GeoJsonFormatter::new(
                writer,
                pretty,
                include_normalized,
            )),
        };
        Ok(formatter)
    }
}

/// JSON layout of the `--report` file
#[derive(Serialize)]
struct ReportFile<'a> {
    #[serde(flatten)]
    report: &'a MatchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    unmatched_addresses: Option<&'a UnmatchedAddresses>,
}

fn write_report(
    path: &Path,
    report: &MatchReport,
    unmatched_addresses: Option<&UnmatchedAddresses>,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let contents = ReportFile {
        report,
        unmatched_addresses,
    };
    serde_json::to_writer_pretty(&mut writer, &contents)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
