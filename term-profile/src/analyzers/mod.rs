//! Record profiling framework.
//!
//! This module turns a set of semi-structured records into per-key statistics
//! without requiring a schema up front.
//!
//! ## Components
//!
//! - **Flattener** (`flatten`): nested objects and arrays become dotted paths
//! - **Record Profiler** (`profiler`): two-pass accumulation and derivation
//! - **Analysis** (`analysis`): raw per-key statistics plus the flattened snapshot
//! - **Report** (`report`): medians, boolean splits and value distributions
//!
//! ## Value kinds
//!
//! Every value is classified as `string`, `number`, `boolean` or `other`
//! (`null` and unexpanded containers). Keys missing from a record count
//! towards the `absent` kind once the key has been discovered.
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use term_profile::analyzers::{analyze, ValueKind};
//!
//! let records = vec![
//!     json!({"a": 1, "b": 1}),
//!     json!({"a": 2, "b": 2}),
//!     json!({"a": 1, "b": "2"}),
//! ];
//!
//! let analysis = analyze(&records).unwrap();
//! let b = analysis.key("b").unwrap();
//! assert_eq!(b.types.get(ValueKind::String).unwrap().occurrences, 1);
//!
//! let report = analysis.report();
//! assert_eq!(
//!     report.get("b").unwrap().possible_values,
//!     vec![json!(1), json!(2), json!("2")]
//! );
//! ```

pub mod analysis;
pub mod flatten;
pub mod profiler;
pub mod report;
pub mod stats;
pub mod types;
pub mod value;

pub use analysis::{Analysis, KeyStatMap};
pub use flatten::{FlatRecord, FlattenOptions, Flattener};
pub use profiler::{
    analyze, ProfilerConfig, ProfilerProgress, ProgressCallback, RecordProfiler,
    RecordProfilerBuilder,
};
pub use report::{KeyReport, Report, ValuePercentage};
pub use types::{BooleanPercentages, KeyStat, TypeStat, TypeStats, ValueCount, ValueStats};
pub use value::ValueKind;
