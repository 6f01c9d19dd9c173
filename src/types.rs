/// Raw field text as read from the source dataset.
/// Example: `PORTO DE SANTOS`
pub type RawValue = String;
/// Column label used in lookup-table headers and the skip guard.
/// Example: `berco` for the output file `berco.csv`
pub type ColumnLabel = String;
/// Name of an output lookup-table file.
/// Example: `berco.csv`
pub type OutputName = String;
/// Positive integer identifier assigned to a distinct categorical value.
/// Example: `1` for the first value in a column's sorted dictionary
pub type CategoryId = u64;
