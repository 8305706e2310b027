//! Common record fixtures for profiling scenarios.
//!
//! This module provides small hand-written record sets and a seeded generator
//! for larger, loosely-structured data. These fixtures simplify writing tests
//! and benchmarks for the profiler.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};

const STATUSES: [&str; 4] = ["ok", "ok", "error", "timeout"];
const REGIONS: [&str; 3] = ["eu-west-1", "us-east-1", "ap-south-1"];
const ROLES: [&str; 3] = ["admin", "editor", "viewer"];

/// Four API access events with nested users and role arrays.
///
/// The records deliberately vary in shape: `cached` is missing from one
/// record, `retry` only appears late, and `latency_ms` is a string once.
pub fn api_event_records() -> Vec<Value> {
    vec![
        json!({
            "status": "ok",
            "latency_ms": 12,
            "cached": true,
            "user": {"id": 1, "roles": ["admin", "editor"]}
        }),
        json!({
            "status": "ok",
            "latency_ms": 30,
            "cached": false,
            "user": {"id": 2, "roles": ["viewer"]}
        }),
        json!({
            "status": "error",
            "latency_ms": "n/a",
            "user": {"id": 3, "roles": []},
            "retry": true
        }),
        json!({
            "status": "ok",
            "latency_ms": 18,
            "cached": true,
            "user": {"id": 1, "roles": ["admin"]},
            "retry": null
        }),
    ]
}

/// Generates `count` records with a stable seed.
///
/// Fields appear with varying probability and sometimes change kind, so the
/// result exercises absence tracking, mixed kinds and nested paths.
pub fn generate_records(count: usize, seed: u64) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|i| generate_record(&mut rng, i)).collect()
}

fn generate_record(rng: &mut StdRng, index: usize) -> Value {
    let mut record = Map::new();
    record.insert("id".to_string(), json!(index));
    record.insert(
        "status".to_string(),
        json!(STATUSES[rng.random_range(0..STATUSES.len())]),
    );

    let latency = if rng.random_bool(0.9) {
        json!(rng.random_range(1..500))
    } else {
        json!("unknown")
    };
    record.insert("latency_ms".to_string(), latency);

    if rng.random_bool(0.7) {
        record.insert("cached".to_string(), json!(rng.random_bool(0.4)));
    }

    if rng.random_bool(0.5) {
        let role_count = rng.random_range(0..3);
        let roles: Vec<Value> = (0..role_count)
            .map(|_| json!(ROLES[rng.random_range(0..ROLES.len())]))
            .collect();
        record.insert(
            "user".to_string(),
            json!({
                "id": rng.random_range(1..20),
                "region": REGIONS[rng.random_range(0..REGIONS.len())],
                "roles": roles,
            }),
        );
    }

    // Late-appearing key, so absence back-dating is exercised.
    if index >= 5 && rng.random_bool(0.8) {
        record.insert("score".to_string(), json!(rng.random_range(0.0..1.0)));
    }

    Value::Object(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_records_is_deterministic() {
        assert_eq!(generate_records(20, 42), generate_records(20, 42));
        assert_eq!(generate_records(20, 42).len(), 20);
    }

    #[test]
    fn test_generated_records_are_objects() {
        assert!(generate_records(30, 1).iter().all(Value::is_object));
    }
}
