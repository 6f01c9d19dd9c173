/// Constants controlling build-phase chunking.
pub mod chunking {
    /// Default maximum number of rows materialized per chunk.
    ///
    /// This bounds build-phase memory; it does **not** affect the final
    /// dictionaries, which are chunk-size invariant.
    pub const DEFAULT_CHUNK_ROWS: usize = 10_000;
}

/// Constants used by the delimited on-disk format.
pub mod format {
    /// Default field delimiter shared by the source dataset, the rewritten
    /// dataset, and lookup tables.
    pub const FIELD_DELIMITER: char = ',';
    /// Leading header cell of every lookup table.
    pub const ID_HEADER: &str = "ID";
}

/// Constants used by the pipeline's output layout.
pub mod output {
    /// Default file name for the rewritten dataset.
    pub const DEFAULT_DATASET_OUT: &str = "final_dataset.csv";
}
