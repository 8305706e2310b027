//! Report formatting for Term profiling results.
//!
//! This module provides different formatters for profiling reports, allowing
//! users to output results as JSON, human-readable text, or Markdown for
//! documentation purposes.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use term_profile::analyzers::analyze;
//! use term_profile::formatters::{HumanFormatter, ReportFormatter};
//!
//! let report = analyze(&[json!({"a": 1}), json!({"a": true})]).unwrap().report();
//! let output = HumanFormatter::new().format(&report).unwrap();
//! assert!(output.contains("a"));
//! ```

use std::fmt::Write;

use chrono::Utc;
use serde::Serialize;

use crate::analyzers::report::{KeyReport, Report};
use crate::error::{Result, TermError};

/// Configuration options for formatting profiling reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include per-value distributions
    pub include_values: bool,
    /// Maximum number of values to display per key (-1 for all)
    pub max_values: i32,
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
    /// Whether to include a generation timestamp in output
    pub include_timestamps: bool,
    /// Decimal places used for percentages and medians in text output
    pub precision: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_values: true,
            max_values: 10,
            use_colors: true,
            include_timestamps: true,
            precision: 2,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only per-key summaries.
    pub fn minimal() -> Self {
        Self {
            include_values: false,
            max_values: 0,
            use_colors: false,
            include_timestamps: false,
            precision: 1,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self {
            include_values: true,
            max_values: -1,
            use_colors: true,
            include_timestamps: true,
            precision: 4,
        }
    }

    /// Creates a configuration suitable for CI/CD environments.
    pub fn ci() -> Self {
        Self {
            include_values: true,
            max_values: 5,
            use_colors: false,
            include_timestamps: true,
            precision: 2,
        }
    }

    /// Sets whether to include value distributions.
    pub fn with_values(mut self, include: bool) -> Self {
        self.include_values = include;
        self
    }

    /// Sets the maximum number of values to display per key.
    pub fn with_max_values(mut self, max: i32) -> Self {
        self.max_values = max;
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Sets whether to include a timestamp.
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    /// Sets the number of decimal places for text output.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn value_limit(&self, available: usize) -> usize {
        if !self.include_values {
            0
        } else if self.max_values < 0 {
            available
        } else {
            available.min(self.max_values as usize)
        }
    }
}

/// Trait for formatting profiling reports into different output formats.
///
/// # Examples
///
/// ```rust
/// use term_profile::analyzers::Report;
/// use term_profile::formatters::ReportFormatter;
///
/// struct KeyCountFormatter;
///
/// impl ReportFormatter for KeyCountFormatter {
///     fn format(&self, report: &Report) -> term_profile::error::Result<String> {
///         Ok(format!("{} keys", report.len()))
///     }
/// }
/// ```
pub trait ReportFormatter {
    /// Formats a report into a string representation.
    fn format(&self, report: &Report) -> Result<String>;

    /// Formats a report with custom configuration.
    fn format_with_config(&self, report: &Report, _config: &FormatterConfig) -> Result<String> {
        // Default implementation ignores config and uses standard format
        self.format(report)
    }
}

/// Formats reports as structured JSON.
///
/// Value lists are trimmed according to the configuration, so the output
/// is a filtered view of the report rather than the raw analysis.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
    record_count: usize,
    keys: Vec<JsonKey<'a>>,
}

#[derive(Serialize)]
struct JsonKey<'a> {
    path: &'a str,
    #[serde(flatten)]
    report: KeyReport,
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &Report, config: &FormatterConfig) -> Result<String> {
        let filtered = JsonReport {
            generated_at: config
                .include_timestamps
                .then(|| Utc::now().to_rfc3339()),
            record_count: report.record_count(),
            keys: report
                .iter()
                .map(|entry| JsonKey {
                    path: &entry.path,
                    report: filter_key_report(entry, config),
                })
                .collect(),
        };

        let serialized = if self.pretty {
            serde_json::to_string_pretty(&filtered)
        } else {
            serde_json::to_string(&filtered)
        };
        serialized
            .map_err(|e| TermError::Internal(format!("Failed to serialize report to JSON: {e}")))
    }
}

/// Formats reports in a human-readable layout for console output.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &Report, config: &FormatterConfig) -> Result<String> {
        let mut output = String::new();
        let p = config.precision;
        let (bold, reset) = if config.use_colors {
            ("\x1b[1m", "\x1b[0m")
        } else {
            ("", "")
        };

        writeln!(output)?;
        writeln!(output, "📋 {bold}Record Profile{reset}")?;
        writeln!(output, "   Records: {}", report.record_count())?;
        writeln!(output, "   Keys: {}", report.len())?;
        if config.include_timestamps {
            writeln!(output, "   Generated: {}", Utc::now().to_rfc3339())?;
        }

        for entry in report.iter() {
            writeln!(output)?;
            writeln!(output, "🔑 {bold}{}{reset}", entry.path)?;
            match entry.median {
                Some(median) => writeln!(output, "   Median: {median:.p$}")?,
                None => writeln!(output, "   Median: -")?,
            }
            writeln!(
                output,
                "   Boolean: {:.p$}% true, {:.p$}% false, {:.p$}% other",
                entry.percentage_true, entry.percentage_false, entry.percentage_non_boolean
            )?;
            writeln!(output, "   Distinct values: {}", entry.possible_values.len())?;

            let shown = config.value_limit(entry.value_percentages.len());
            for value in entry.most_common().into_iter().take(shown) {
                writeln!(output, "      {:>8.p$}%  {}", value.percentage, value.value)?;
            }
            if config.include_values && entry.value_percentages.len() > shown {
                writeln!(
                    output,
                    "      ... and {} more values",
                    entry.value_percentages.len() - shown
                )?;
            }
        }

        writeln!(output)?;
        Ok(output)
    }
}

/// Formats reports as Markdown suitable for documentation.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    /// Creates a new Markdown formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    /// Creates a new Markdown formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level for the output.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &Report, config: &FormatterConfig) -> Result<String> {
        let mut output = String::new();
        let h = "#".repeat(self.heading_level as usize);
        let p = config.precision;

        writeln!(output, "{h} Record Profile")?;
        writeln!(output)?;
        writeln!(output, "**Records:** {}", report.record_count())?;
        if config.include_timestamps {
            writeln!(output, "**Generated:** {}", Utc::now().to_rfc3339())?;
        }

        writeln!(output)?;
        writeln!(output, "{h}# Keys")?;
        writeln!(output)?;
        writeln!(output, "| Key | Median | True % | False % | Non-boolean % | Distinct |")?;
        writeln!(output, "|-----|--------|--------|---------|---------------|----------|")?;
        for entry in report.iter() {
            let median = entry
                .median
                .map_or_else(|| "-".to_string(), |m| format!("{m:.p$}"));
            writeln!(
                output,
                "| {} | {median} | {:.p$} | {:.p$} | {:.p$} | {} |",
                code_cell(&entry.path),
                entry.percentage_true,
                entry.percentage_false,
                entry.percentage_non_boolean,
                entry.possible_values.len()
            )?;
        }

        if config.include_values {
            for entry in report.iter() {
                let shown = config.value_limit(entry.value_percentages.len());
                if shown == 0 {
                    continue;
                }
                writeln!(output)?;
                writeln!(output, "{h}## `{}`", entry.path)?;
                writeln!(output)?;
                writeln!(output, "| Value | Share |")?;
                writeln!(output, "|-------|-------|")?;
                for value in entry.most_common().into_iter().take(shown) {
                    writeln!(
                        output,
                        "| {} | {:.p$}% |",
                        code_cell(&value.value.to_string()),
                        value.percentage
                    )?;
                }
                if entry.value_percentages.len() > shown {
                    writeln!(output)?;
                    writeln!(
                        output,
                        "> **Note:** {} additional values not shown.",
                        entry.value_percentages.len() - shown
                    )?;
                }
            }
        }

        Ok(output)
    }
}

/// Helper function to trim a key report's value lists based on configuration.
///
/// Kept values are the most common ones, highest share first, matching the
/// text formatters.
fn filter_key_report(entry: &KeyReport, config: &FormatterConfig) -> KeyReport {
    let limit = config.value_limit(entry.value_percentages.len());
    let kept: Vec<_> = entry
        .most_common()
        .into_iter()
        .take(limit)
        .cloned()
        .collect();

    KeyReport {
        possible_values: kept.iter().map(|vp| vp.value.clone()).collect(),
        value_percentages: kept,
        ..entry.clone()
    }
}

/// Renders `text` as an inline code span that is safe inside a table cell.
fn code_cell(text: &str) -> String {
    let escaped = text.replace('|', "\\|");
    if escaped.contains('`') {
        format!("`` {escaped} ``")
    } else {
        format!("`{escaped}`")
    }
}
