use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ColumnLabel, RawValue};

/// Pipeline phase named in fatal diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// First pass: chunked dictionary building.
    Build,
    /// Second pass: streaming id substitution.
    Rewrite,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Build => f.write_str("build"),
            Phase::Rewrite => f.write_str("rewrite"),
        }
    }
}

/// Error type for configuration, IO, and build/rewrite consistency failures.
#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("source '{}' is unreadable during {phase}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        phase: Phase,
        source: io::Error,
    },
    #[error("output '{}' is unwritable: {source}", .path.display())]
    OutputUnwritable { path: PathBuf, source: io::Error },
    #[error("value '{value}' in column '{column}' has no assigned identifier (data row {row})")]
    UnknownValue {
        column: ColumnLabel,
        value: RawValue,
        row: usize,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
}
