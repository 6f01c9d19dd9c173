#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Bounded chunk reading over delimited sources.
pub mod chunk;
/// Command-line entry points shared by the `catenc` binary.
pub mod cli;
/// Pipeline configuration and column specifications.
pub mod config;
/// Centralized constants used across the pipeline.
pub mod constants;
/// Per-column dictionary accumulation.
pub mod dictionary;
/// Identifier assignment and lookup-table rendering.
pub mod ids;
/// Build/rewrite orchestration.
pub mod pipeline;
/// Aggregate cardinality metrics over finalized dictionaries.
pub mod report;
/// Streaming id-substitution over the source dataset.
pub mod rewrite;
/// Shared type aliases.
pub mod types;

mod errors;

pub use chunk::{ChunkReader, ExtractedChunk};
pub use config::{ColumnSpec, EncoderConfig};
pub use dictionary::{ColumnDictionary, DictionaryArena};
pub use errors::{EncoderError, Phase};
pub use ids::{assign_ids, IdAssignment, LookupIndex};
pub use pipeline::{run_pipeline, RunSummary};
pub use report::{column_cardinality, CardinalityReport, ColumnCardinality};
pub use rewrite::RewriteEngine;
pub use types::{CategoryId, ColumnLabel, OutputName, RawValue};
