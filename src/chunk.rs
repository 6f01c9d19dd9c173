//! Bounded chunk reading over delimited sources.
//!
//! Ownership model:
//! - `ChunkReader` owns the source reader for the duration of the build
//!   phase and hands it back via `into_inner` so the orchestrator can
//!   rewind it for the rewrite pass.
//! - `ExtractedChunk` is transient: produced here, consumed by the
//!   dictionary accumulator, then dropped.

use std::io::BufRead;
use std::path::PathBuf;

use crate::config::ColumnSpec;
use crate::errors::{EncoderError, Phase};
use crate::types::RawValue;

/// A bounded batch of rows reduced to their categorical slots.
///
/// Each row holds one raw value per categorical column, in
/// column-specification order; everything else was discarded at read time
/// for memory economy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedChunk {
    rows: Vec<Vec<RawValue>>,
}

impl ExtractedChunk {
    /// Number of rows in the chunk.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the chunk holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the categorical slot `slot` across every row.
    ///
    /// `slot` is the position within the column specification, not the
    /// source column index.
    pub fn column_values(&self, slot: usize) -> impl Iterator<Item = &RawValue> + '_ {
        self.rows.iter().map(move |row| &row[slot])
    }
}

/// Pulls bounded chunks of extracted categorical values from a source.
pub struct ChunkReader<R> {
    reader: R,
    source: PathBuf,
    indexes: Vec<usize>,
    delimiter: char,
    max_rows: usize,
    line: String,
}

impl<R: BufRead> ChunkReader<R> {
    /// Create a reader that extracts `columns` from `reader`.
    ///
    /// `source` is only used in diagnostics; `max_rows` bounds the size of
    /// every produced chunk.
    pub fn new(
        reader: R,
        source: impl Into<PathBuf>,
        columns: &[ColumnSpec],
        delimiter: char,
        max_rows: usize,
    ) -> Self {
        Self {
            reader,
            source: source.into(),
            indexes: columns.iter().map(|column| column.index).collect(),
            delimiter,
            max_rows,
            line: String::new(),
        }
    }

    /// Read the next chunk of up to `max_rows` rows.
    ///
    /// Returns `Ok(None)` once the source is exhausted. A short final chunk
    /// is a complete unit of work, not an error.
    pub fn next_chunk(&mut self) -> Result<Option<ExtractedChunk>, EncoderError> {
        let mut rows = Vec::new();
        while rows.len() < self.max_rows {
            self.line.clear();
            let read =
                self.reader
                    .read_line(&mut self.line)
                    .map_err(|source| EncoderError::SourceUnreadable {
                        path: self.source.clone(),
                        phase: Phase::Build,
                        source,
                    })?;
            if read == 0 {
                break;
            }
            let row = trim_line_ending(&self.line);
            rows.push(extract_slots(row, self.delimiter, &self.indexes));
        }
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ExtractedChunk { rows }))
        }
    }

    /// Hand the underlying reader back to the caller.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Strip the trailing newline produced by `read_line`, if any.
pub(crate) fn trim_line_ending(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

/// Pick the raw values at `indexes` out of a delimited row.
///
/// Indexes past the row's width yield empty values; ragged rows are
/// tolerated, never an error.
fn extract_slots(row: &str, delimiter: char, indexes: &[usize]) -> Vec<RawValue> {
    let fields: Vec<&str> = row.split(delimiter).collect();
    indexes
        .iter()
        .map(|&index| fields.get(index).copied().unwrap_or("").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader<'a>(data: &'a str, columns: &[ColumnSpec], max_rows: usize) -> ChunkReader<Cursor<&'a str>> {
        ChunkReader::new(Cursor::new(data), "test.csv", columns, ',', max_rows)
    }

    #[test]
    fn chunks_are_bounded_and_the_final_chunk_may_be_short() {
        let columns = vec![ColumnSpec::new(0, "a.csv")];
        let mut chunks = reader("1\n2\n3\n4\n5\n", &columns, 2);
        assert_eq!(chunks.next_chunk().unwrap().unwrap().len(), 2);
        assert_eq!(chunks.next_chunk().unwrap().unwrap().len(), 2);
        assert_eq!(chunks.next_chunk().unwrap().unwrap().len(), 1);
        assert!(chunks.next_chunk().unwrap().is_none());
        assert!(chunks.next_chunk().unwrap().is_none());
    }

    #[test]
    fn extraction_follows_specification_order_not_source_order() {
        let columns = vec![ColumnSpec::new(2, "c.csv"), ColumnSpec::new(0, "a.csv")];
        let mut chunks = reader("x,y,z\n", &columns, 10);
        let chunk = chunks.next_chunk().unwrap().unwrap();
        let first: Vec<&RawValue> = chunk.column_values(0).collect();
        let second: Vec<&RawValue> = chunk.column_values(1).collect();
        assert_eq!(first, vec!["z"]);
        assert_eq!(second, vec!["x"]);
    }

    #[test]
    fn ragged_rows_yield_empty_values_for_missing_slots() {
        let columns = vec![ColumnSpec::new(3, "d.csv")];
        let mut chunks = reader("a,b\nq,r,s,t\n", &columns, 10);
        let chunk = chunks.next_chunk().unwrap().unwrap();
        let values: Vec<&RawValue> = chunk.column_values(0).collect();
        assert_eq!(values, vec!["", "t"]);
    }

    #[test]
    fn last_line_without_trailing_newline_is_still_a_row() {
        let columns = vec![ColumnSpec::new(1, "b.csv")];
        let mut chunks = reader("h1,h2\nv1,v2", &columns, 10);
        let chunk = chunks.next_chunk().unwrap().unwrap();
        assert_eq!(chunk.len(), 2);
        let values: Vec<&RawValue> = chunk.column_values(0).collect();
        assert_eq!(values, vec!["h2", "v2"]);
    }
}
