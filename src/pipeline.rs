//! Build/rewrite orchestration.
//!
//! The orchestrator owns resource lifetimes only: it opens the source once,
//! drives the chunked build loop, materializes lookup tables, rewinds the
//! stream, and runs the rewrite pass. No encoding logic lives here.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Seek, Write};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::chunk::ChunkReader;
use crate::config::EncoderConfig;
use crate::dictionary::DictionaryArena;
use crate::errors::{EncoderError, Phase};
use crate::ids::{assign_ids, IdAssignment, LookupIndex};
use crate::report::{column_cardinality, CardinalityReport};
use crate::rewrite::RewriteEngine;
use crate::types::ColumnLabel;

/// Outcome summary of a completed pipeline run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Number of data rows written to the rewritten dataset.
    pub data_rows: usize,
    /// Number of chunks consumed during the build phase.
    pub chunks: usize,
    /// Aggregate cardinality metrics over the finalized dictionaries.
    pub cardinality: Option<CardinalityReport>,
}

/// Run the full build-then-rewrite pipeline described by `config`.
///
/// Build phase: loop the chunk reader into the dictionary arena until the
/// source is exhausted. Then assign identifiers, write one lookup table per
/// column, rewind the source, and stream the rewrite pass. Fatal conditions
/// abort immediately; partial outputs from an aborted run are not valid.
pub fn run_pipeline(config: &EncoderConfig) -> Result<RunSummary, EncoderError> {
    config.validate()?;

    let file = File::open(&config.source).map_err(|source| EncoderError::SourceUnreadable {
        path: config.source.clone(),
        phase: Phase::Build,
        source,
    })?;
    let reader = BufReader::new(file);

    info!(
        "building dictionaries from '{}' ({} categorical columns)",
        config.source.display(),
        config.columns.len()
    );
    let arena = DictionaryArena::new(&config.columns);
    let mut chunk_reader = ChunkReader::new(
        reader,
        &config.source,
        &config.columns,
        config.delimiter,
        config.chunk_rows,
    );
    let mut chunks = 0usize;
    while let Some(chunk) = chunk_reader.next_chunk()? {
        arena.accumulate(&chunk);
        chunks += 1;
        debug!("accumulated chunk {} ({} rows)", chunks, chunk.len());
    }

    let dictionaries = arena.into_dictionaries();
    let assignments = assign_ids(&dictionaries);
    let report = column_cardinality(&assignments);
    if let Some(report) = &report {
        info!(
            "assigned identifiers for {} columns ({} distinct values)",
            report.columns, report.total
        );
    }

    write_lookup_tables(config, &assignments)?;

    let index = LookupIndex::new(&config.columns, &assignments);
    let mut reader = chunk_reader.into_inner();
    reader
        .rewind()
        .map_err(|source| EncoderError::SourceUnreadable {
            path: config.source.clone(),
            phase: Phase::Rewrite,
            source,
        })?;

    let out_path = config.dataset_path();
    let out = File::create(&out_path).map_err(|source| EncoderError::OutputUnwritable {
        path: out_path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(out);
    info!("rewriting dataset into '{}'", out_path.display());
    let engine = RewriteEngine::new(&index, config.delimiter);
    let data_rows = engine.rewrite(&config.source, &mut reader, &out_path, &mut writer)?;
    writer
        .flush()
        .map_err(|source| EncoderError::OutputUnwritable {
            path: out_path,
            source,
        })?;

    Ok(RunSummary {
        data_rows,
        chunks,
        cardinality: report,
    })
}

/// Write one lookup table per column into the configured output directory.
fn write_lookup_tables(
    config: &EncoderConfig,
    assignments: &IndexMap<ColumnLabel, IdAssignment>,
) -> Result<(), EncoderError> {
    fs::create_dir_all(&config.output_dir).map_err(|source| EncoderError::OutputUnwritable {
        path: config.output_dir.clone(),
        source,
    })?;
    for column in &config.columns {
        let Some(assignment) = assignments.get(&column.label()) else {
            continue;
        };
        let path = config.table_path(column);
        fs::write(&path, assignment.render_table(config.delimiter)).map_err(|source| {
            EncoderError::OutputUnwritable {
                path: path.clone(),
                source,
            }
        })?;
        debug!(
            "wrote lookup table '{}' ({} identifiers)",
            path.display(),
            assignment.len()
        );
    }
    Ok(())
}
