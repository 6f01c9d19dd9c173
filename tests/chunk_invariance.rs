use std::fs;
use std::path::Path;

use catenc::{run_pipeline, ColumnSpec, EncoderConfig};
use tempfile::tempdir;

fn run_with_chunk_rows(dir: &Path, source: &Path, chunk_rows: usize) -> (String, String, usize) {
    let config = EncoderConfig {
        source: source.to_path_buf(),
        output_dir: dir.join(format!("out_{chunk_rows}")),
        columns: vec![ColumnSpec::new(1, "porto.csv")],
        chunk_rows,
        ..EncoderConfig::default()
    };
    let summary = run_pipeline(&config).unwrap();
    let table = fs::read_to_string(config.table_path(&config.columns[0])).unwrap();
    let rewritten = fs::read_to_string(config.dataset_path()).unwrap();
    (table, rewritten, summary.chunks)
}

#[test]
fn outputs_are_identical_for_any_chunk_size() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("dataset.csv");
    let mut content = String::from("id,porto\n");
    for row in 0..50 {
        content.push_str(&format!("{row},porto_{}\n", row % 7));
    }
    fs::write(&source, content).unwrap();

    let (table_one, rewritten_one, chunks_one) = run_with_chunk_rows(dir.path(), &source, 1);
    let (table_n, rewritten_n, chunks_n) = run_with_chunk_rows(dir.path(), &source, 16);
    let (table_all, rewritten_all, chunks_all) = run_with_chunk_rows(dir.path(), &source, 10_000);

    assert_eq!(table_one, table_n);
    assert_eq!(table_n, table_all);
    assert_eq!(rewritten_one, rewritten_n);
    assert_eq!(rewritten_n, rewritten_all);

    // 51 lines including the header.
    assert_eq!(chunks_one, 51);
    assert_eq!(chunks_n, 4);
    assert_eq!(chunks_all, 1);
}
