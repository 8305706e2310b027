//! Example demonstrating structured logging during profiling.
//!
//! This example shows how Term uses structured logging with:
//! - JSON formatted events
//! - Per-key discovery logging in verbose mode
//! - Spans around profiling and source loading

use std::error::Error;
use term_profile::logging::setup::{init_logging, LoggingConfig};
use term_profile::prelude::*;
use term_profile::test_fixtures::generate_records;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    let config = LoggingConfig::development()
        .with_json_format(true)
        .with_term_level(Level::TRACE);
    init_logging(config)?;

    info!("Structured logging initialized");

    let source = MemorySource::new("generated", generate_records(40, 5));
    let profiler = RecordProfiler::builder()
        .log_config(LogConfig::verbose())
        .build();
    let analysis = profiler.profile_source(&source).await?;

    info!(
        keys = analysis.keys().len(),
        records = analysis.record_count(),
        "Profiling finished"
    );

    Ok(())
}
