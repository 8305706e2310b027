//! # Term Profile - Schema-less Record Profiling for Rust
//!
//! Term Profile summarizes collections of loosely-structured JSON records
//! without requiring a schema up front. It flattens nested records into
//! dotted key paths and reports, for every path, how often it appears, which
//! values it takes and which kinds of values it holds.
//!
//! ## Overview
//!
//! Feed Term Profile a batch of API responses, log events or document-store
//! exports and it answers questions like "which keys are optional?", "is this
//! flag usually true?" or "what does the latency field look like?". Results
//! come as a raw [`analyzers::Analysis`] for programmatic use and as a
//! [`analyzers::Report`] for people.
//!
//! ## Quick Start
//!
//! ```rust
//! use term_profile::prelude::*;
//! use serde_json::json;
//!
//! # fn example() -> term_profile::error::Result<()> {
//! let records = vec![
//!     json!({"status": "ok", "latency": 12, "user": {"admin": true}}),
//!     json!({"status": "ok", "latency": 30, "user": {"admin": false}}),
//!     json!({"status": "error", "latency": "timeout"}),
//! ];
//!
//! let analysis = RecordProfiler::new().analyze(&records)?;
//! let report = analysis.report();
//!
//! let latency = report.get("latency").unwrap();
//! assert_eq!(latency.median, Some(21.0));
//!
//! let admin = report.get("user.admin").unwrap();
//! assert!((admin.percentage_non_boolean - 100.0 / 3.0).abs() < 1e-9);
//!
//! println!("{}", HumanFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Key Features
//!
//! - **Flattening**: configurable delimiter, depth limit and array handling
//! - **Key coverage**: presence counts plus back-dated absence tracking
//! - **Value distributions**: distinct values in first-seen order with shares
//! - **Kind statistics**: medians for numbers, true/false splits for booleans
//! - **Sources**: JSON documents, NDJSON files and glob patterns
//! - **Formatting**: JSON, human-readable and Markdown reports
//!
//! ## Architecture
//!
//! - **`analyzers`**: flattening, the two-pass profiler and report derivation
//! - **`sources`**: record loaders for files and in-memory data
//! - **`formatters`**: report rendering
//! - **`logging`**: structured logging configuration and macros
//! - **`error`**: the crate-wide error type
//!
//! ## Examples
//!
//! See the `demos` directory for complete examples:
//!
//! - `basic_profile.rs`: profiling in-memory records
//! - `ndjson_profile.rs`: profiling line-delimited log files
//! - `report_formatters_example.rs`: rendering reports
//! - `structured_logging_example.rs`: wiring up `tracing`

pub mod analyzers;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod sources;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
