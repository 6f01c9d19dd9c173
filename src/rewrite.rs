//! Streaming id-substitution over the source dataset.
//!
//! Ownership model:
//! - `RewriteEngine` borrows the finalized `LookupIndex` read-only; nothing
//!   mutates the index concurrently with a rewrite.
//! - Rows are rendered and written one at a time; the dataset is never
//!   buffered whole.

use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::chunk::trim_line_ending;
use crate::errors::{EncoderError, Phase};
use crate::ids::LookupIndex;

/// Streams the source through id substitution into a writer.
pub struct RewriteEngine<'a> {
    index: &'a LookupIndex,
    delimiter: char,
}

impl<'a> RewriteEngine<'a> {
    /// Create an engine substituting via `index`, joining fields with
    /// `delimiter`.
    pub fn new(index: &'a LookupIndex, delimiter: char) -> Self {
        Self { index, delimiter }
    }

    /// Copy `reader` to `writer`, replacing categorical values with their
    /// identifiers.
    ///
    /// The first row is the header and is emitted verbatim regardless of
    /// column classification. Every output row is newline-terminated. A
    /// categorical value with no assigned identifier aborts the pass: it
    /// means the source diverged between the build and rewrite phases.
    ///
    /// `source` and `out` name the two files in diagnostics. Returns the
    /// number of data rows written.
    pub fn rewrite<R: BufRead, W: Write>(
        &self,
        source: &Path,
        reader: &mut R,
        out: &Path,
        writer: &mut W,
    ) -> Result<usize, EncoderError> {
        let mut line = String::new();
        let mut rendered = String::new();
        let mut row_index = 0usize;
        loop {
            line.clear();
            let read =
                reader
                    .read_line(&mut line)
                    .map_err(|source_err| EncoderError::SourceUnreadable {
                        path: source.to_path_buf(),
                        phase: Phase::Rewrite,
                        source: source_err,
                    })?;
            if read == 0 {
                break;
            }
            let row = trim_line_ending(&line);
            if row_index == 0 {
                // Header row passes through untouched.
                writeln!(writer, "{row}").map_err(|source_err| {
                    EncoderError::OutputUnwritable {
                        path: out.to_path_buf(),
                        source: source_err,
                    }
                })?;
            } else {
                rendered.clear();
                self.render_row(row, row_index, &mut rendered)?;
                writeln!(writer, "{rendered}").map_err(|source_err| {
                    EncoderError::OutputUnwritable {
                        path: out.to_path_buf(),
                        source: source_err,
                    }
                })?;
            }
            row_index += 1;
        }
        let data_rows = row_index.saturating_sub(1);
        debug!("rewrote {} data rows into '{}'", data_rows, out.display());
        Ok(data_rows)
    }

    /// Render one data row, substituting categorical fields by identifier.
    fn render_row(
        &self,
        row: &str,
        row_index: usize,
        rendered: &mut String,
    ) -> Result<(), EncoderError> {
        for (field_index, field) in row.split(self.delimiter).enumerate() {
            if field_index > 0 {
                rendered.push(self.delimiter);
            }
            match self.index.column(field_index) {
                Some(assignment) => {
                    let id = assignment.id_of(field).ok_or_else(|| {
                        EncoderError::UnknownValue {
                            column: assignment.label().to_string(),
                            value: field.to_string(),
                            row: row_index,
                        }
                    })?;
                    let _ = write!(rendered, "{id}");
                }
                None => rendered.push_str(field),
            }
        }
        Ok(())
    }
}
