//! Integration tests for record sources.

use serde_json::json;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;
use term_profile::prelude::*;
use term_profile::sources::{JsonFormatType, JsonOptions};

/// Creates a test directory with two NDJSON log files and one JSON export.
fn create_json_test_data() -> TempDir {
    let dir = TempDir::new().unwrap();

    let mut file1 = File::create(dir.path().join("events1.ndjson")).unwrap();
    writeln!(file1, r#"{{"status": "ok", "latency": 10, "cached": true}}"#).unwrap();
    writeln!(file1, r#"{{"status": "ok", "latency": 20}}"#).unwrap();
    file1.flush().unwrap();

    let mut file2 = File::create(dir.path().join("events2.ndjson")).unwrap();
    writeln!(file2, r#"{{"status": "error", "latency": 30, "cached": false}}"#).unwrap();
    writeln!(file2, r#"{{"status": "ok", "latency": 40, "retry": {{"count": 2}}}}"#).unwrap();
    file2.flush().unwrap();

    let mut file3 = File::create(dir.path().join("users.json")).unwrap();
    writeln!(
        file3,
        r#"[{{"name": "Alice", "admin": true}}, {{"name": "Bob", "admin": false}}]"#
    )
    .unwrap();
    file3.flush().unwrap();

    dir
}

#[tokio::test]
async fn test_profile_ndjson_glob() {
    let dir = create_json_test_data();
    let pattern = format!("{}/*.ndjson", dir.path().display());
    let source = JsonSource::from_glob(pattern).unwrap();
    assert_eq!(source.paths().len(), 2);

    let analysis = RecordProfiler::new().profile_source(&source).await.unwrap();
    assert_eq!(analysis.record_count(), 4);

    let report = analysis.report();
    assert_eq!(report.get("latency").unwrap().median, Some(25.0));
    assert_eq!(report.get("status").unwrap().possible_values, vec![json!("ok"), json!("error")]);
    assert!(report.get("retry.count").is_some());
    assert_eq!(
        analysis.key("retry.count").unwrap().types.absent().unwrap().occurrences,
        3
    );
}

#[tokio::test]
async fn test_profile_json_document() {
    let dir = create_json_test_data();
    let path = dir.path().join("users.json");
    let source = JsonSource::new(path.to_str().unwrap()).unwrap();
    assert_eq!(source.options().format, JsonFormatType::Json);

    let report = RecordProfiler::new()
        .profile_source(&source)
        .await
        .unwrap()
        .report();
    let admin = report.get("admin").unwrap();
    assert_eq!(admin.percentage_true, 50.0);
    assert_eq!(admin.percentage_false, 50.0);
    assert_eq!(admin.percentage_non_boolean, 0.0);
}

#[tokio::test]
async fn test_max_records_across_files() {
    let dir = create_json_test_data();
    let source = JsonSource::from_globs(vec![format!("{}/*.ndjson", dir.path().display())])
        .unwrap()
        .with_custom_options(JsonOptions {
            format: JsonFormatType::NdJson,
            max_records: Some(3),
        });

    let analysis = RecordProfiler::new().profile_source(&source).await.unwrap();
    assert_eq!(analysis.record_count(), 3);
    assert!(analysis.key("retry.count").is_none());
}

#[tokio::test]
async fn test_memory_source() {
    let source = MemorySource::new("fixtures", vec![json!({"a": 1}), json!({"a": 2, "b": 3})]);
    let analysis = RecordProfiler::new().profile_source(&source).await.unwrap();

    assert_eq!(analysis.key("b").unwrap().types.absent().unwrap().occurrences, 1);
}

#[tokio::test]
async fn test_invalid_record_from_source() {
    let dir = TempDir::new().unwrap();
    let mut file = File::create(dir.path().join("mixed.ndjson")).unwrap();
    writeln!(file, r#"{{"a": 1}}"#).unwrap();
    writeln!(file, "[1, 2]").unwrap();
    file.flush().unwrap();

    let source = JsonSource::new(dir.path().join("mixed.ndjson").to_str().unwrap()).unwrap();
    let err = RecordProfiler::new().profile_source(&source).await.unwrap_err();
    assert!(matches!(err, TermError::InvalidRecord { index: 1, .. }));
}

#[test]
fn test_glob_without_matches() {
    let dir = TempDir::new().unwrap();
    let err = JsonSource::from_glob(format!("{}/*.ndjson", dir.path().display())).unwrap_err();
    assert!(matches!(err, TermError::DataSource { .. }));
}
