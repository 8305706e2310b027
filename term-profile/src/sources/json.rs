//! JSON and NDJSON file source implementation.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, instrument};

use super::RecordSource;
use crate::error::{Result, TermError};

/// Format type for JSON files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormatType {
    /// Line-delimited JSON (one JSON object per line)
    NdJson,
    /// Regular JSON (an array of records or a single record)
    Json,
}

impl JsonFormatType {
    /// Detects JSON format from file extension.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.ends_with(".ndjson") || lower.ends_with(".jsonl") {
            Self::NdJson
        } else {
            Self::Json
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::NdJson => "NDJSON",
            Self::Json => "JSON",
        }
    }
}

/// Options for configuring JSON file reading.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// JSON format type
    pub format: JsonFormatType,
    /// Stop after this many records in total (None reads everything)
    pub max_records: Option<usize>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            format: JsonFormatType::NdJson,
            max_records: None,
        }
    }
}

/// A JSON/NDJSON file record source.
///
/// # Examples
///
/// ```rust,no_run
/// use term_profile::sources::{JsonFormatType, JsonOptions, JsonSource};
///
/// # fn example() -> term_profile::error::Result<()> {
/// // NDJSON file (auto-detected)
/// let source = JsonSource::new("data/events.ndjson")?;
///
/// // Regular JSON with custom options
/// let options = JsonOptions {
///     format: JsonFormatType::Json,
///     ..Default::default()
/// };
/// let source = JsonSource::with_options("data/users.json", options)?;
///
/// // Every log file in a directory
/// let source = JsonSource::from_glob("logs/*.jsonl")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JsonSource {
    paths: Vec<String>,
    options: JsonOptions,
}

impl JsonSource {
    /// Creates a new JSON source from a single file path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path_str = path.into();
        let format = JsonFormatType::from_path(&path_str);

        Ok(Self {
            paths: vec![path_str],
            options: JsonOptions {
                format,
                ..Default::default()
            },
        })
    }

    /// Creates a new JSON source with custom options.
    pub fn with_options(path: impl Into<String>, options: JsonOptions) -> Result<Self> {
        Ok(Self {
            paths: vec![path.into()],
            options,
        })
    }

    /// Creates a JSON source from multiple file paths.
    pub fn from_paths(paths: Vec<String>) -> Result<Self> {
        if paths.is_empty() {
            return Err(TermError::Configuration(
                "At least one path must be provided".to_string(),
            ));
        }

        // Auto-detect format from first file
        let format = JsonFormatType::from_path(&paths[0]);

        Ok(Self {
            paths,
            options: JsonOptions {
                format,
                ..Default::default()
            },
        })
    }

    /// Creates a JSON source from a glob pattern.
    pub fn from_glob(pattern: impl Into<String>) -> Result<Self> {
        let paths = super::expand_globs(&[pattern.into()])?;
        Self::from_paths(paths)
    }

    /// Creates a JSON source from multiple glob patterns.
    pub fn from_globs(patterns: Vec<String>) -> Result<Self> {
        let paths = super::expand_globs(&patterns)?;
        Self::from_paths(paths)
    }

    /// Sets custom options for this JSON source.
    pub fn with_custom_options(mut self, options: JsonOptions) -> Self {
        self.options = options;
        self
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn options(&self) -> &JsonOptions {
        &self.options
    }

    async fn read_file(&self, path: &str) -> Result<Vec<Value>> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            TermError::data_source_with_source(
                self.options.format.label(),
                format!("Failed to read '{path}'"),
                Box::new(e),
            )
        })?;

        let records = match self.options.format {
            JsonFormatType::Json => parse_document(path, &text)?,
            JsonFormatType::NdJson => parse_lines(path, &text)?,
        };
        debug!(path, records = records.len(), "Read record file");
        Ok(records)
    }
}

fn parse_document(path: &str, text: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| TermError::Parse(format!("{path}: {e}")))?;
    match document {
        Value::Array(records) => Ok(records),
        record @ Value::Object(_) => Ok(vec![record]),
        _ => Err(TermError::data_source(
            "JSON",
            format!("{path}: expected an array of records or a single object"),
        )),
    }
}

fn parse_lines(path: &str, text: &str) -> Result<Vec<Value>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|e| TermError::Parse(format!("{path}:{}: {e}", index + 1)))
        })
        .collect()
}

#[async_trait]
impl RecordSource for JsonSource {
    #[instrument(skip(self), fields(files = self.paths.len()))]
    async fn load(&self) -> Result<Vec<Value>> {
        let batches = try_join_all(self.paths.iter().map(|path| self.read_file(path))).await?;

        let mut records: Vec<Value> = batches.into_iter().flatten().collect();
        if let Some(max) = self.options.max_records {
            records.truncate(max);
        }
        Ok(records)
    }

    fn description(&self) -> String {
        let format_str = self.options.format.label();

        if self.paths.len() == 1 {
            format!("{} file: {}", format_str, self.paths[0])
        } else {
            format!("{} files: {} files", format_str, self.paths.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_ndjson() -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".ndjson").unwrap();
        writeln!(file, r#"{{"id": 1, "name": "Alice", "age": 30}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id": 2, "name": "Bob"}}"#).unwrap();
        writeln!(file, r#"{{"id": 3, "name": "Charlie", "age": 35}}"#).unwrap();
        file.flush().unwrap();
        file
    }

    fn create_test_json() -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(
            file,
            r#"[
            {{"id": 1, "name": "Alice", "age": 30}},
            {{"id": 2, "name": "Bob", "age": 25}}
        ]"#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(JsonFormatType::from_path("a.ndjson"), JsonFormatType::NdJson);
        assert_eq!(JsonFormatType::from_path("a.JSONL"), JsonFormatType::NdJson);
        assert_eq!(JsonFormatType::from_path("a.json"), JsonFormatType::Json);
    }

    #[tokio::test]
    async fn test_ndjson_source() {
        let file = create_test_ndjson();
        let source = JsonSource::new(file.path().to_str().unwrap()).unwrap();
        assert_eq!(source.options().format, JsonFormatType::NdJson);

        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], json!({"id": 2, "name": "Bob"}));
        assert!(source.description().starts_with("NDJSON file: "));
    }

    #[tokio::test]
    async fn test_json_array_source() {
        let file = create_test_json();
        let source = JsonSource::new(file.path().to_str().unwrap()).unwrap();

        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], json!("Alice"));
    }

    #[tokio::test]
    async fn test_multiple_files_keep_path_order() {
        let first = create_test_json();
        let second = create_test_json();
        let source = JsonSource::from_paths(vec![
            first.path().to_str().unwrap().to_string(),
            second.path().to_str().unwrap().to_string(),
        ])
        .unwrap();

        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(source.description(), "JSON files: 2 files");
    }

    #[tokio::test]
    async fn test_max_records() {
        let file = create_test_ndjson();
        let source = JsonSource::new(file.path().to_str().unwrap())
            .unwrap()
            .with_custom_options(JsonOptions {
                format: JsonFormatType::NdJson,
                max_records: Some(2),
            });
        assert_eq!(source.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_line_reports_line_number() {
        let mut file = NamedTempFile::with_suffix(".jsonl").unwrap();
        writeln!(file, r#"{{"ok": true}}"#).unwrap();
        writeln!(file, "{{broken").unwrap();
        file.flush().unwrap();

        let source = JsonSource::new(file.path().to_str().unwrap()).unwrap();
        match source.load().await.unwrap_err() {
            TermError::Parse(message) => assert!(message.contains(":2: ")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_scalar_document_is_rejected() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "42").unwrap();
        file.flush().unwrap();

        let source = JsonSource::new(file.path().to_str().unwrap()).unwrap();
        assert!(matches!(
            source.load().await.unwrap_err(),
            TermError::DataSource { .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = JsonSource::new("/no/such/file.ndjson").unwrap();
        assert!(matches!(
            source.load().await.unwrap_err(),
            TermError::DataSource { .. }
        ));
    }

    #[test]
    fn test_empty_paths_rejected() {
        assert!(matches!(
            JsonSource::from_paths(Vec::new()).unwrap_err(),
            TermError::Configuration(_)
        ));
    }
}
