use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{chunking, format, output};
use crate::errors::EncoderError;
use crate::types::{ColumnLabel, OutputName};

/// Identifies one categorical column in the source dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Zero-based index of the column in the source rows.
    pub index: usize,
    /// Output file name for this column's lookup table (e.g., `berco.csv`).
    pub file: OutputName,
}

impl ColumnSpec {
    /// Create a spec from a source index and lookup-table file name.
    pub fn new(index: usize, file: impl Into<OutputName>) -> Self {
        Self {
            index,
            file: file.into(),
        }
    }

    /// Column label used in the lookup-table header and the skip guard.
    ///
    /// The label is the output file name with its extension stripped
    /// (`berco.csv` -> `berco`), which in well-formed datasets matches the
    /// column's field in the source header row.
    pub fn label(&self) -> ColumnLabel {
        Path::new(&self.file)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.file)
            .to_string()
    }
}

/// Pipeline configuration consumed by [`crate::run_pipeline`].
#[derive(Clone, Debug)]
pub struct EncoderConfig {
    /// Source dataset path (first row = header, comma-delimited by default).
    pub source: PathBuf,
    /// Directory receiving lookup tables and the rewritten dataset.
    pub output_dir: PathBuf,
    /// File name of the rewritten dataset inside `output_dir`.
    pub dataset_out: OutputName,
    /// Categorical columns, in specification order.
    pub columns: Vec<ColumnSpec>,
    /// Maximum rows materialized per chunk during the build phase.
    pub chunk_rows: usize,
    /// Field delimiter shared by the source and every output.
    pub delimiter: char,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            output_dir: PathBuf::from("."),
            dataset_out: output::DEFAULT_DATASET_OUT.to_string(),
            columns: Vec::new(),
            chunk_rows: chunking::DEFAULT_CHUNK_ROWS,
            delimiter: format::FIELD_DELIMITER,
        }
    }
}

impl EncoderConfig {
    /// Destination path of the rewritten dataset.
    pub fn dataset_path(&self) -> PathBuf {
        self.output_dir.join(&self.dataset_out)
    }

    /// Destination path of `column`'s lookup table.
    pub fn table_path(&self, column: &ColumnSpec) -> PathBuf {
        self.output_dir.join(&column.file)
    }

    /// Check the column-specification invariants.
    ///
    /// Indices must be unique; output names and the labels derived from
    /// them must be unique (labels identify dictionaries). Row width is not
    /// validated here: it is unknown until rows are read, and extraction
    /// bound-checks instead.
    pub fn validate(&self) -> Result<(), EncoderError> {
        if self.columns.is_empty() {
            return Err(EncoderError::Configuration(
                "no categorical columns configured".to_string(),
            ));
        }
        if self.chunk_rows == 0 {
            return Err(EncoderError::Configuration(
                "chunk_rows must be at least 1".to_string(),
            ));
        }
        let mut indexes = HashSet::new();
        let mut labels = HashSet::new();
        for column in &self.columns {
            if !indexes.insert(column.index) {
                return Err(EncoderError::Configuration(format!(
                    "duplicate column index {}",
                    column.index
                )));
            }
            if !labels.insert(column.label()) {
                return Err(EncoderError::Configuration(format!(
                    "duplicate column label '{}' (from '{}')",
                    column.label(),
                    column.file
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_strips_the_file_extension() {
        assert_eq!(ColumnSpec::new(1, "berco.csv").label(), "berco");
        assert_eq!(ColumnSpec::new(2, "mes").label(), "mes");
    }

    fn config_with(columns: Vec<ColumnSpec>) -> EncoderConfig {
        EncoderConfig {
            columns,
            ..EncoderConfig::default()
        }
    }

    #[test]
    fn validate_rejects_empty_column_list() {
        let err = config_with(Vec::new()).validate().unwrap_err();
        assert!(matches!(err, EncoderError::Configuration(_)));
    }

    #[test]
    fn validate_rejects_duplicate_indexes() {
        let config = config_with(vec![
            ColumnSpec::new(1, "a.csv"),
            ColumnSpec::new(1, "b.csv"),
        ]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate column index 1"));
    }

    #[test]
    fn validate_rejects_colliding_labels() {
        let config = config_with(vec![
            ColumnSpec::new(1, "a.csv"),
            ColumnSpec::new(2, "a.txt"),
        ]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate column label 'a'"));
    }

    #[test]
    fn validate_accepts_a_well_formed_spec() {
        let config = config_with(vec![
            ColumnSpec::new(1, "berco.csv"),
            ColumnSpec::new(3, "mes.csv"),
        ]);
        assert!(config.validate().is_ok());
    }
}
