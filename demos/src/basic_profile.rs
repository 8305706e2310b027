//! Basic record profiling example.
//!
//! Profiles a handful of in-memory API events and prints what the profiler
//! learned about each key.

use serde_json::json;
use std::error::Error;
use term_profile::prelude::*;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    println!("Term Basic Profiling Example\n");

    let records = vec![
        json!({"status": "ok", "latency_ms": 12, "user": {"id": 1, "admin": true}}),
        json!({"status": "ok", "latency_ms": 30, "user": {"id": 2, "admin": false}}),
        json!({"status": "error", "latency_ms": "timeout"}),
        json!({"status": "ok", "latency_ms": 18, "user": {"id": 1, "admin": true}, "retry": 1}),
    ];

    let analysis = RecordProfiler::new().analyze(&records)?;

    println!("Profiled {} records, found {} keys:", analysis.record_count(), analysis.keys().len());
    for stat in analysis.keys().iter() {
        let kinds: Vec<String> = stat
            .types
            .iter()
            .map(|(kind, kind_stat)| format!("{kind}={}", kind_stat.occurrences))
            .collect();
        println!(
            "  {:<12} present {} times, {} distinct values [{}]",
            stat.path,
            stat.occurrences,
            stat.values.len(),
            kinds.join(", ")
        );
    }

    let report = analysis.report();
    if let Some(latency) = report.get("latency_ms") {
        println!("\nMedian latency: {:?}", latency.median);
    }
    if let Some(admin) = report.get("user.admin") {
        println!(
            "Admins: {:.1}% true, {:.1}% false, {:.1}% missing or non-boolean",
            admin.percentage_true, admin.percentage_false, admin.percentage_non_boolean
        );
    }

    Ok(())
}
