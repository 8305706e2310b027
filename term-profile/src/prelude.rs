//! Prelude for commonly used types and traits in term-profile.

pub use crate::analyzers::{
    analyze, Analysis, FlattenOptions, KeyReport, Report, RecordProfiler, ValueKind,
};
pub use crate::error::{ErrorContext, Result, TermError};
pub use crate::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
pub use crate::logging::LogConfig;
pub use crate::sources::{JsonSource, MemorySource, RecordSource};
