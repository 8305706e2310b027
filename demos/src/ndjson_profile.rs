//! Example profiling line-delimited JSON log files.
//!
//! Writes two NDJSON files into a temporary directory, loads them through a
//! glob pattern and prints a Markdown report.

use std::error::Error;
use std::fs;
use tempfile::TempDir;
use term_profile::prelude::*;
use term_profile::test_fixtures::generate_records;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;

    for (index, seed) in [11u64, 12].into_iter().enumerate() {
        let lines: Vec<String> = generate_records(250, seed)
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<_, _>>()?;
        fs::write(
            dir.path().join(format!("access-{index}.ndjson")),
            lines.join("\n"),
        )
        .context("Writing demo log file")?;
    }

    let source = JsonSource::from_glob(format!("{}/*.ndjson", dir.path().display()))?;
    println!("Loading {}", source.description());

    let profiler = RecordProfiler::builder()
        .progress_callback(|progress| {
            println!(
                "  pass {}/{}: {} ({} records)",
                progress.current_pass, progress.total_passes, progress.message, progress.records
            );
        })
        .build();
    let analysis = profiler.profile_source(&source).await?;

    let formatter = MarkdownFormatter::with_config(FormatterConfig::ci());
    println!("\n{}", formatter.format(&analysis.report())?);

    Ok(())
}
