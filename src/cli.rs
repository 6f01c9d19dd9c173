//! Command-line entry points shared by the `catenc` binary.
//!
//! This layer owns everything the pipeline treats as an external
//! collaborator: argument parsing, column-spec loading, stale-output
//! removal, subscriber setup, and wall-clock reporting. The pipeline itself
//! never touches process-level concerns.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ColumnSpec, EncoderConfig};
use crate::constants::{chunking, output};
use crate::errors::EncoderError;
use crate::pipeline::run_pipeline;

/// Encode categorical columns of a delimited dataset as integer ids.
#[derive(Debug, Parser)]
#[command(
    name = "catenc",
    about = "Build per-column lookup tables and rewrite categorical values as ids"
)]
pub struct Cli {
    /// Source dataset path (first row = header).
    pub source: PathBuf,
    /// Categorical column as `<index>=<lookup-file>` (repeatable).
    #[arg(long = "column", value_name = "INDEX=FILE", value_parser = parse_column)]
    pub columns: Vec<ColumnSpec>,
    /// JSON file holding an array of `{"index": .., "file": ..}` specs.
    #[arg(long, value_name = "PATH")]
    pub spec: Option<PathBuf>,
    /// Output directory for lookup tables and the rewritten dataset.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
    /// File name of the rewritten dataset.
    #[arg(long, default_value = output::DEFAULT_DATASET_OUT)]
    pub dataset_out: String,
    /// Maximum rows per build-phase chunk.
    #[arg(long, default_value_t = chunking::DEFAULT_CHUNK_ROWS)]
    pub chunk_rows: usize,
    /// Keep outputs from previous runs instead of removing them first.
    #[arg(long)]
    pub keep_existing: bool,
}

/// Parse one `<index>=<file>` column flag.
fn parse_column(raw: &str) -> Result<ColumnSpec, String> {
    let (index, file) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <index>=<file>, got '{raw}'"))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid column index '{index}'"))?;
    let file = file.trim();
    if file.is_empty() {
        return Err(format!("empty lookup file name in '{raw}'"));
    }
    Ok(ColumnSpec::new(index, file))
}

impl Cli {
    /// Resolve the parsed arguments into a validated pipeline configuration.
    ///
    /// Columns from `--column` flags and from the `--spec` file are
    /// concatenated, flags first.
    pub fn into_config(self) -> Result<EncoderConfig, EncoderError> {
        let mut columns = self.columns;
        if let Some(spec) = &self.spec {
            let raw = fs::read_to_string(spec).map_err(|err| {
                EncoderError::Configuration(format!(
                    "cannot read column spec '{}': {err}",
                    spec.display()
                ))
            })?;
            let mut from_file: Vec<ColumnSpec> = serde_json::from_str(&raw).map_err(|err| {
                EncoderError::Configuration(format!(
                    "invalid column spec '{}': {err}",
                    spec.display()
                ))
            })?;
            columns.append(&mut from_file);
        }
        let config = EncoderConfig {
            source: self.source,
            output_dir: self.output_dir,
            dataset_out: self.dataset_out,
            columns,
            chunk_rows: self.chunk_rows,
            ..EncoderConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// Initialize the tracing subscriber used by the binary.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Remove outputs left behind by a previous run.
///
/// Only the configured lookup tables and the rewritten dataset are touched;
/// missing files are not an error.
pub fn clean_existing_outputs(config: &EncoderConfig) {
    let mut targets: Vec<PathBuf> = config
        .columns
        .iter()
        .map(|column| config.table_path(column))
        .collect();
    targets.push(config.dataset_path());
    for target in targets {
        match fs::remove_file(&target) {
            Ok(()) => info!("removed stale output '{}'", target.display()),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!("could not remove '{}': {err}", target.display()),
        }
    }
}

/// Parse arguments, run the pipeline, and log the outcome.
pub fn run() -> Result<(), EncoderError> {
    let cli = Cli::parse();
    let keep_existing = cli.keep_existing;
    let config = cli.into_config()?;
    if !keep_existing {
        clean_existing_outputs(&config);
    }
    info!("using {} worker threads", rayon::current_num_threads());
    let started = Instant::now();
    let summary = run_pipeline(&config)?;
    info!(
        "encoded {} data rows across {} chunks in {:.2?}",
        summary.data_rows,
        summary.chunks,
        started.elapsed()
    );
    Ok(())
}
