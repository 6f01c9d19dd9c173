use indexmap::IndexMap;

use crate::ids::IdAssignment;
use crate::types::ColumnLabel;

/// Aggregate cardinality metrics over per-column identifier assignments.
#[derive(Clone, Debug, PartialEq)]
pub struct CardinalityReport {
    /// Total identifiers assigned across all columns.
    pub total: usize,
    /// Number of categorical columns.
    pub columns: usize,
    /// Smallest per-column identifier count.
    pub min: usize,
    /// Largest per-column identifier count.
    pub max: usize,
    /// Mean identifiers per column.
    pub mean: f64,
    /// Share of all identifiers held by the largest column.
    pub max_share: f64,
    /// Per-column counts, largest first.
    pub per_column: Vec<ColumnCardinality>,
}

/// Per-column share of all assigned identifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnCardinality {
    /// Column label.
    pub column: ColumnLabel,
    /// Identifiers assigned to this column.
    pub count: usize,
    /// This column's share of the total.
    pub share: f64,
}

/// Compute cardinality metrics from finalized identifier assignments.
pub fn column_cardinality(
    assignments: &IndexMap<ColumnLabel, IdAssignment>,
) -> Option<CardinalityReport> {
    if assignments.is_empty() {
        return None;
    }
    let total: usize = assignments.values().map(IdAssignment::len).sum();
    let columns = assignments.len();
    let min = assignments
        .values()
        .map(IdAssignment::len)
        .min()
        .expect("assignments non-empty");
    let max = assignments
        .values()
        .map(IdAssignment::len)
        .max()
        .expect("assignments non-empty");
    let mean = total as f64 / columns as f64;
    let max_share = if total == 0 {
        0.0
    } else {
        max as f64 / total as f64
    };
    let mut per_column: Vec<ColumnCardinality> = assignments
        .iter()
        .map(|(column, assignment)| ColumnCardinality {
            column: column.clone(),
            count: assignment.len(),
            share: if total == 0 {
                0.0
            } else {
                assignment.len() as f64 / total as f64
            },
        })
        .collect();
    per_column.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.column.cmp(&b.column)));
    Some(CardinalityReport {
        total,
        columns,
        min,
        max,
        mean,
        max_share,
        per_column,
    })
}
