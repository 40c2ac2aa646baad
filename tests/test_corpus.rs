use pipebench::corpus::load_corpus;
use pipebench::runner::{BenchConfig, run_benchmark};
use pipebench::{DataError, FnPipeline, Pipeline};
use std::cell::Cell;
use std::io::Write;
use tempfile::NamedTempFile;

fn corpus_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_returns_samples_and_lengths() {
    let file = corpus_file(r#"["The cat", "The cat sat on the mat.", "ñandú"]"#);
    let corpus = load_corpus(file.path()).unwrap();

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.samples()[1].text(), "The cat sat on the mat.");
    assert_eq!(corpus.lengths(), vec![7, 23, 5]);
}

#[test]
fn test_missing_file_is_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_corpus(dir.path().join("absent.json")).unwrap_err();

    assert!(matches!(err, DataError::Io { .. }));
}

#[test]
fn test_malformed_json_is_data_error() {
    let file = corpus_file(r#"["unterminated"#);
    let err = load_corpus(file.path()).unwrap_err();

    assert!(matches!(err, DataError::Json(_)));
}

#[test]
fn test_empty_corpus_runs_no_pipeline() {
    let file = corpus_file("[]");
    let corpus = load_corpus(file.path()).unwrap();
    assert!(corpus.is_empty());

    let calls = Cell::new(0);
    let pipeline = FnPipeline::new("counting", |_: &str| {
        calls.set(calls.get() + 1);
        Ok::<_, String>(())
    });
    let config = BenchConfig {
        trials: 3,
        warmup: 1,
    };

    let results = run_benchmark(corpus.samples(), &[&pipeline as &dyn Pipeline], &config).unwrap();

    assert!(results.is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_object_corpus_is_key_ordered() {
    let file = corpus_file(r#"{"b": "second", "a": "first"}"#);
    let corpus = load_corpus(file.path()).unwrap();

    assert_eq!(corpus.samples()[0].text(), "first");
    assert_eq!(corpus.samples()[1].text(), "second");
}
