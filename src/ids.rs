//! Identifier assignment and lookup-table rendering.
//!
//! Ownership model:
//! - `IdAssignment` is produced once per column from its finalized
//!   dictionary and is immutable thereafter.
//! - `LookupIndex` flattens every column's assignment behind a
//!   (column, value) key for the rewrite pass; keying by value alone would
//!   collide when two columns share a literal, so the source column index
//!   is always part of the key.

use std::collections::HashMap;
use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::config::ColumnSpec;
use crate::constants::format::ID_HEADER;
use crate::dictionary::ColumnDictionary;
use crate::types::{CategoryId, ColumnLabel, RawValue};

/// Immutable value-to-identifier assignment for one categorical column.
#[derive(Clone, Debug)]
pub struct IdAssignment {
    label: ColumnLabel,
    entries: Vec<(RawValue, CategoryId)>,
    by_value: HashMap<RawValue, CategoryId>,
}

impl IdAssignment {
    /// Assign 1-based identifiers over `dictionary` in sorted order.
    ///
    /// A value textually equal to the column label is skipped without
    /// consuming an identifier. In well-formed datasets this removes
    /// exactly the header field; see the format notes in the README.
    pub fn from_dictionary(label: impl Into<ColumnLabel>, dictionary: &ColumnDictionary) -> Self {
        let label = label.into();
        let mut entries = Vec::with_capacity(dictionary.len());
        let mut by_value = HashMap::with_capacity(dictionary.len());
        let mut next_id: CategoryId = 1;
        for value in dictionary.values() {
            if *value == label {
                continue;
            }
            entries.push((value.clone(), next_id));
            by_value.insert(value.clone(), next_id);
            next_id += 1;
        }
        Self {
            label,
            entries,
            by_value,
        }
    }

    /// Column label used in the rendered table header.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Identifier assigned to `value`, if any.
    pub fn id_of(&self, value: &str) -> Option<CategoryId> {
        self.by_value.get(value).copied()
    }

    /// Number of assigned identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no identifier was assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (value, id) pairs in ascending value (and therefore id) order.
    pub fn entries(&self) -> &[(RawValue, CategoryId)] {
        &self.entries
    }

    /// Render the lookup-table content: an `ID,<label>` header followed by
    /// one `<id>,<value>` line per entry in ascending identifier order.
    pub fn render_table(&self, delimiter: char) -> String {
        let mut table = String::new();
        let _ = writeln!(table, "{ID_HEADER}{delimiter}{}", self.label);
        for (value, id) in &self.entries {
            let _ = writeln!(table, "{id}{delimiter}{value}");
        }
        table
    }
}

/// Assign identifiers for every finalized dictionary, preserving
/// column-specification order.
pub fn assign_ids(
    dictionaries: &[(ColumnLabel, ColumnDictionary)],
) -> IndexMap<ColumnLabel, IdAssignment> {
    dictionaries
        .iter()
        .map(|(label, dictionary)| {
            (
                label.clone(),
                IdAssignment::from_dictionary(label.clone(), dictionary),
            )
        })
        .collect()
}

/// Flattened (column, value)-keyed index consulted by the rewrite pass.
#[derive(Clone, Debug, Default)]
pub struct LookupIndex {
    by_index: HashMap<usize, IdAssignment>,
}

impl LookupIndex {
    /// Build the index from per-column assignments, keyed by source column
    /// index.
    pub fn new(
        columns: &[ColumnSpec],
        assignments: &IndexMap<ColumnLabel, IdAssignment>,
    ) -> Self {
        let mut by_index = HashMap::with_capacity(columns.len());
        for column in columns {
            if let Some(assignment) = assignments.get(&column.label()) {
                by_index.insert(column.index, assignment.clone());
            }
        }
        Self { by_index }
    }

    /// Assignment covering source column `index`, if that column is
    /// categorical.
    pub fn column(&self, index: usize) -> Option<&IdAssignment> {
        self.by_index.get(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary_of(values: &[&str]) -> ColumnDictionary {
        let mut dictionary = ColumnDictionary::new();
        dictionary.merge(values.iter().map(|value| value.to_string()));
        dictionary
    }

    #[test]
    fn identifiers_are_one_based_ranks_in_sorted_order() {
        let assignment = IdAssignment::from_dictionary("b", &dictionary_of(&["cat2", "cat1"]));
        assert_eq!(assignment.id_of("cat1"), Some(1));
        assert_eq!(assignment.id_of("cat2"), Some(2));
        assert_eq!(assignment.id_of("cat3"), None);
        assert_eq!(assignment.len(), 2);
    }

    #[test]
    fn assignment_is_a_bijection_onto_dense_ranks() {
        let assignment =
            IdAssignment::from_dictionary("col", &dictionary_of(&["w", "x", "y", "z"]));
        let mut ids: Vec<CategoryId> =
            assignment.entries().iter().map(|(_, id)| *id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn value_equal_to_the_label_is_skipped_without_consuming_an_id() {
        let assignment =
            IdAssignment::from_dictionary("b", &dictionary_of(&["b", "cat1", "cat2"]));
        assert_eq!(assignment.id_of("b"), None);
        assert_eq!(assignment.id_of("cat1"), Some(1));
        assert_eq!(assignment.id_of("cat2"), Some(2));
    }

    #[test]
    fn render_table_emits_header_then_ascending_ids() {
        let assignment = IdAssignment::from_dictionary("b", &dictionary_of(&["b", "cat2", "cat1"]));
        assert_eq!(assignment.render_table(','), "ID,b\n1,cat1\n2,cat2\n");
    }

    #[test]
    fn empty_dictionary_renders_a_header_only_table() {
        let assignment = IdAssignment::from_dictionary("b", &ColumnDictionary::new());
        assert_eq!(assignment.render_table(','), "ID,b\n");
    }

    #[test]
    fn lookup_index_scopes_identifiers_per_column() {
        let columns = vec![ColumnSpec::new(1, "b.csv"), ColumnSpec::new(2, "c.csv")];
        let dictionaries = vec![
            ("b".to_string(), dictionary_of(&["0", "1"])),
            ("c".to_string(), dictionary_of(&["1"])),
        ];
        let assignments = assign_ids(&dictionaries);
        let index = LookupIndex::new(&columns, &assignments);

        // The literal "1" resolves differently depending on the column.
        assert_eq!(index.column(1).unwrap().id_of("1"), Some(2));
        assert_eq!(index.column(2).unwrap().id_of("1"), Some(1));
        assert!(index.column(0).is_none());
    }
}
