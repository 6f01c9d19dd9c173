//! Per-column dictionary accumulation.
//!
//! Ownership model:
//! - `DictionaryArena` owns one locked `ColumnDictionary` per categorical
//!   column and is threaded through the build loop by reference; it grows
//!   monotonically until the source is exhausted.
//! - A merge holds exactly one column's lock; merges for different columns
//!   proceed concurrently inside a rayon fork-join region, and the region
//!   joins before the next chunk is read.

use std::sync::Mutex;

use rayon::prelude::*;

use crate::chunk::ExtractedChunk;
use crate::config::ColumnSpec;
use crate::types::{ColumnLabel, RawValue};

/// Sorted, duplicate-free set of distinct raw values for one column.
///
/// The sorted/deduplicated invariant is restored after every merge, not
/// only at the end of the stream: identifier assignment is positional in
/// this order, and each chunk's merge starts from a dictionary that already
/// satisfies it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnDictionary {
    values: Vec<RawValue>,
}

impl ColumnDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `observed` values, then restore the sorted, duplicate-free
    /// invariant.
    ///
    /// Cost per merge is `O(k log k)` in the number of distinct values seen
    /// so far, which stays far below the row count for categorical columns.
    pub fn merge<I>(&mut self, observed: I)
    where
        I: IntoIterator<Item = RawValue>,
    {
        self.values.extend(observed);
        self.values.sort_unstable();
        self.values.dedup();
    }

    /// Number of distinct values observed so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no value has been observed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct values in ascending order.
    pub fn values(&self) -> &[RawValue] {
        &self.values
    }

    /// True when values are strictly ascending (sorted and duplicate-free).
    pub fn is_strictly_sorted(&self) -> bool {
        self.values.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// Arena of per-column dictionaries shared across chunk iterations.
pub struct DictionaryArena {
    slots: Vec<ColumnSlot>,
}

/// One column's label plus its lock-guarded running dictionary.
struct ColumnSlot {
    label: ColumnLabel,
    dictionary: Mutex<ColumnDictionary>,
}

impl DictionaryArena {
    /// Create one empty dictionary per configured categorical column.
    pub fn new(columns: &[ColumnSpec]) -> Self {
        Self {
            slots: columns
                .iter()
                .map(|column| ColumnSlot {
                    label: column.label(),
                    dictionary: Mutex::new(ColumnDictionary::new()),
                })
                .collect(),
        }
    }

    /// Merge a chunk into every column's dictionary.
    ///
    /// Columns fan out across rayon workers and the call returns only after
    /// every column's extraction-and-merge completed, so the caller may read
    /// the next chunk immediately afterwards.
    pub fn accumulate(&self, chunk: &ExtractedChunk) {
        self.slots.par_iter().enumerate().for_each(|(slot, state)| {
            let observed: Vec<RawValue> = chunk.column_values(slot).cloned().collect();
            let mut dictionary = state.dictionary.lock().expect("column dictionary poisoned");
            dictionary.merge(observed);
            debug_assert!(dictionary.is_strictly_sorted());
        });
    }

    /// Number of column slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no column is configured.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Distinct-value count per column, in specification order.
    pub fn cardinalities(&self) -> Vec<(ColumnLabel, usize)> {
        self.slots
            .iter()
            .map(|slot| {
                let dictionary = slot.dictionary.lock().expect("column dictionary poisoned");
                (slot.label.clone(), dictionary.len())
            })
            .collect()
    }

    /// Consume the arena, yielding each column's finalized dictionary in
    /// specification order.
    pub fn into_dictionaries(self) -> Vec<(ColumnLabel, ColumnDictionary)> {
        self.slots
            .into_iter()
            .map(|slot| {
                let dictionary = slot
                    .dictionary
                    .into_inner()
                    .expect("column dictionary poisoned");
                (slot.label, dictionary)
            })
            .collect()
    }
}
