//! Example demonstrating the various report formatters in Term.
//!
//! This example shows how to format profiling reports in different ways:
//! - JSON format for programmatic consumption
//! - Human-readable format for console output
//! - Markdown format for documentation
//! - Custom formatting configurations

use std::error::Error;
use term_profile::prelude::*;
use term_profile::test_fixtures::api_event_records;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let report = analyze(&api_event_records())?.report();

    println!("=== JSON Format ===");
    let json_formatter = JsonFormatter::new();
    println!("{}", json_formatter.format(&report)?);

    println!("\n=== Human-Readable Format ===");
    let human_formatter = HumanFormatter::new();
    println!("{}", human_formatter.format(&report)?);

    println!("\n=== Markdown Format ===");
    let markdown_formatter = MarkdownFormatter::new().with_heading_level(1);
    println!("{}", markdown_formatter.format(&report)?);

    println!("\n=== Custom Configurations ===");

    println!("\n--- Minimal ---");
    let minimal = HumanFormatter::with_config(FormatterConfig::minimal());
    println!("{}", minimal.format(&report)?);

    println!("\n--- Top two values, no colors ---");
    let config = FormatterConfig::default()
        .with_max_values(2)
        .with_colors(false)
        .with_precision(1);
    println!("{}", human_formatter.format_with_config(&report, &config)?);

    println!("\n--- Compact JSON for CI ---");
    let compact = JsonFormatter::with_config(FormatterConfig::ci()).with_pretty(false);
    println!("{}", compact.format(&report)?);

    Ok(())
}
