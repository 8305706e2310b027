//! Record profiling with a two-pass algorithm.
//!
//! The [`RecordProfiler`] turns a sequence of loosely-structured records into
//! per-key statistics:
//!
//! **Pass 1: Accumulation**
//! - Flatten every record into dotted paths
//! - Count key presence, distinct values and value kinds
//! - Track absence of already-discovered keys, back-dated to record 0
//!
//! **Pass 2: Derivation**
//! - Median of the numeric values of each key with a `number` kind
//! - True / false / other split of each key with a `boolean` kind
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use term_profile::analyzers::RecordProfiler;
//!
//! let records = vec![
//!     json!({"id": 1, "user": {"active": true}}),
//!     json!({"id": 2, "user": {"active": false, "plan": "pro"}}),
//! ];
//!
//! let profiler = RecordProfiler::builder().delimiter("/").build();
//! let analysis = profiler.analyze(&records).unwrap();
//!
//! assert_eq!(analysis.key("id").unwrap().occurrences, 2);
//! assert_eq!(analysis.key("user/plan").unwrap().occurrences, 1);
//!
//! let report = analysis.report();
//! assert_eq!(report.get("user/active").unwrap().percentage_true, 50.0);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::analyzers::analysis::{Analysis, KeyStatMap};
use crate::analyzers::flatten::{FlatRecord, FlattenOptions, Flattener};
use crate::analyzers::stats::{median, percentage};
use crate::analyzers::types::BooleanPercentages;
use crate::analyzers::value::{json_type_name, ValueKind};
use crate::error::{Result, TermError};
use crate::logging::{truncate_field, LogConfig};
use crate::sources::RecordSource;
use crate::{log_data_op, log_key, perf_debug};

/// Configuration for the record profiler
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfig {
    /// How nested records are flattened before accumulation
    pub flatten: FlattenOptions,
    /// Logging behavior while profiling
    pub log_config: LogConfig,
}

/// Progress callback for profiling operations
pub type ProgressCallback = Arc<dyn Fn(ProfilerProgress) + Send + Sync>;

/// Progress information during profiling
#[derive(Debug, Clone)]
pub struct ProfilerProgress {
    pub current_pass: u8,
    pub total_passes: u8,
    pub records: usize,
    pub message: String,
}

/// Builder for RecordProfiler
pub struct RecordProfilerBuilder {
    config: ProfilerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl RecordProfilerBuilder {
    /// Set the separator placed between flattened path segments
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.config.flatten.delimiter = delimiter.into();
        self
    }

    /// Limit how many nesting levels are expanded
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.flatten.max_depth = Some(depth);
        self
    }

    /// Keep arrays whole instead of expanding them by index
    pub fn preserve_arrays(mut self, preserve: bool) -> Self {
        self.config.flatten.preserve_arrays = preserve;
        self
    }

    /// Replace all flattening options at once
    pub fn flatten_options(mut self, options: FlattenOptions) -> Self {
        self.config.flatten = options;
        self
    }

    /// Set the logging configuration
    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.config.log_config = log_config;
        self
    }

    /// Set progress callback
    pub fn progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProfilerProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Build the RecordProfiler
    pub fn build(self) -> RecordProfiler {
        RecordProfiler {
            flattener: Flattener::new(self.config.flatten.clone()),
            config: self.config,
            progress_callback: self.progress_callback,
        }
    }
}

/// Profiles record sets into an [`Analysis`].
///
/// A profiler holds no per-run state, so one instance can serve any number of
/// independent analyses, including from several threads at once.
#[derive(Clone)]
pub struct RecordProfiler {
    config: ProfilerConfig,
    flattener: Flattener,
    progress_callback: Option<ProgressCallback>,
}

impl RecordProfiler {
    /// Create a new builder for RecordProfiler
    pub fn builder() -> RecordProfilerBuilder {
        RecordProfilerBuilder {
            config: ProfilerConfig::default(),
            progress_callback: None,
        }
    }

    /// Create a RecordProfiler with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile a record set.
    ///
    /// Every record must be a JSON object; nested objects and arrays are
    /// flattened into path keys first. An empty input yields an empty
    /// analysis.
    ///
    /// # Errors
    ///
    /// - [`TermError::Configuration`] if the flattening options are unusable
    /// - [`TermError::InvalidRecord`] if any record is not an object
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn analyze(&self, records: &[Value]) -> Result<Analysis> {
        let start_time = std::time::Instant::now();
        self.config.flatten.validate()?;

        log_data_op!(
            self.config.log_config,
            records = records.len(),
            "Starting record profiling"
        );

        let original = self.snapshot(records)?;

        self.report_progress(1, 2, original.len(), "Accumulating key statistics");
        let mut keys = accumulate(&original, &self.config.log_config);
        perf_debug!(
            self.config.log_config,
            keys = keys.len(),
            "Accumulation pass complete"
        );

        self.report_progress(2, 2, original.len(), "Deriving medians and boolean ratios");
        derive_type_statistics(&mut keys, &original);

        info!(
            records = original.len(),
            keys = keys.len(),
            time_ms = start_time.elapsed().as_millis() as u64,
            "Completed record profiling"
        );

        Ok(Analysis::new(keys, original))
    }

    /// Load records from `source` and profile them.
    #[instrument(skip(self, source), fields(source = %source.description()))]
    pub async fn profile_source(&self, source: &dyn RecordSource) -> Result<Analysis> {
        let records = source.load().await?;
        log_data_op!(
            self.config.log_config,
            records = records.len(),
            "Loaded records from source"
        );
        self.analyze(&records)
    }

    /// Owned, flattened copy of the input.
    fn snapshot(&self, records: &[Value]) -> Result<Vec<FlatRecord>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| match record {
                Value::Object(map) => Ok(self.flattener.flatten(map)),
                other => Err(TermError::invalid_record(index, json_type_name(other))),
            })
            .collect()
    }

    /// Report progress to callback if configured
    fn report_progress(&self, current_pass: u8, total_passes: u8, records: usize, message: &str) {
        if let Some(callback) = &self.progress_callback {
            callback(ProfilerProgress {
                current_pass,
                total_passes,
                records,
                message: message.to_string(),
            });
        }
    }
}

impl Default for RecordProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordProfiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordProfiler")
            .field("config", &self.config)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

/// Profile `records` with the default configuration.
pub fn analyze(records: &[Value]) -> Result<Analysis> {
    RecordProfiler::new().analyze(records)
}

/// Pass 1: presence, value and kind counts per key.
///
/// Keys are discovered lazily. When a key first shows up in record `n > 0`,
/// its `absent` count is seeded with `n` because every earlier record lacked
/// it. From then on the key is checked against each later record and counted
/// absent once per record that lacks it. Keys of the first record start
/// without an `absent` entry.
fn accumulate(records: &[FlatRecord], log_config: &LogConfig) -> KeyStatMap {
    let mut keys = KeyStatMap::new();
    let mut items_covered: u64 = 0;

    for record in records {
        for (path, value) in record {
            let (stat, discovered) = keys.get_or_insert(path);
            stat.record(value);

            if discovered {
                if items_covered > 0 && !stat.types.contains(ValueKind::Absent) {
                    stat.types.seed(ValueKind::Absent, items_covered);
                }
                log_key!(
                    log_config,
                    path = %truncate_field(path, log_config.max_field_length),
                    record = items_covered,
                    "Discovered key"
                );
            }
        }

        for stat in keys.iter_mut() {
            let kind = ValueKind::of_field(record.get(&stat.path));
            if kind == ValueKind::Absent {
                stat.types.increment(kind);
            }
        }

        items_covered += 1;
    }

    keys
}

/// Pass 2: numeric medians and boolean splits. Overwrites previously derived
/// values, so re-running over the same records changes nothing.
fn derive_type_statistics(keys: &mut KeyStatMap, records: &[FlatRecord]) {
    let total = records.len() as u64;

    for stat in keys.iter_mut() {
        let path = stat.path.as_str();

        if let Some(number) = stat.types.get_mut(ValueKind::Number) {
            let values: Vec<f64> = records
                .iter()
                .filter_map(|record| match record.get(path) {
                    Some(Value::Number(n)) => n.as_f64(),
                    _ => None,
                })
                .collect();
            number.median = median(&values);
        }

        if let Some(boolean) = stat.types.get_mut(ValueKind::Boolean) {
            let (mut true_count, mut false_count, mut other_count) = (0u64, 0u64, 0u64);
            for record in records {
                match record.get(path) {
                    Some(Value::Bool(true)) => true_count += 1,
                    Some(Value::Bool(false)) => false_count += 1,
                    _ => other_count += 1,
                }
            }
            boolean.percentages = Some(BooleanPercentages {
                percent_true: percentage(true_count, total),
                percent_false: percentage(false_count, total),
                percent_other: percentage(other_count, total),
            });
        }
    }
}
