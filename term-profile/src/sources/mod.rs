//! Record sources for the Term profiler.
//!
//! This module provides loaders that turn files into record sets ready for
//! profiling: JSON documents (an array of records or a single record) and
//! line-delimited JSON, with glob support for multi-file inputs.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::error::{Result, TermError};

mod json;
mod memory;

pub use json::{JsonFormatType, JsonOptions, JsonSource};
pub use memory::MemorySource;

/// A source of records that can be handed to the profiler.
///
/// # Examples
///
/// ```rust,no_run
/// use term_profile::analyzers::RecordProfiler;
/// use term_profile::sources::JsonSource;
///
/// # async fn example() -> term_profile::error::Result<()> {
/// let source = JsonSource::new("data/events.ndjson")?;
/// let analysis = RecordProfiler::new().profile_source(&source).await?;
/// println!("{} keys", analysis.keys().len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RecordSource: Debug + Send + Sync {
    /// Loads every record, in source order.
    async fn load(&self) -> Result<Vec<Value>>;

    /// Returns a human-readable description of this source.
    fn description(&self) -> String;
}

/// Utility function to expand glob patterns into file paths.
pub(crate) fn expand_globs(patterns: &[String]) -> Result<Vec<String>> {
    use glob::glob;

    let mut paths = Vec::new();
    for pattern in patterns {
        let matches = glob(pattern).map_err(|e| {
            TermError::Configuration(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;

        for entry in matches {
            let path = entry.map_err(|e| TermError::Io(std::io::Error::other(e)))?;

            if path.is_file() {
                if let Some(path_str) = path.to_str() {
                    paths.push(path_str.to_string());
                }
            }
        }
    }

    if paths.is_empty() {
        return Err(TermError::data_source(
            "file",
            "No files found matching glob patterns",
        ));
    }

    Ok(paths)
}
