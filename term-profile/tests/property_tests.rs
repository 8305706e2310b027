//! Property-based tests for the record profiler.
//!
//! Records are generated over a small key alphabet with a mix of strings,
//! integers, booleans, nulls, nested objects and arrays, so keys collide, go
//! missing, change kind and change shape between records.
//!
//! ## Properties
//!
//! - Tracked keys are exactly the distinct flattened paths of the input
//! - Per-key value counts add up to the key's occurrences
//! - Presence plus absence accounts for every record
//! - Boolean splits cover all records
//! - Profiling is deterministic

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use term_profile::analyzers::{analyze, ValueKind};

const KEYS: [&str; 5] = ["a", "b", "c", "d", "e"];

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (-50i64..50).prop_map(Value::from),
        "[a-c]{0,2}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

fn field() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => scalar(),
        1 => proptest::collection::vec((0..KEYS.len(), scalar()), 0..3).prop_map(|fields| {
            let mut map = Map::new();
            for (key, value) in fields {
                map.insert(KEYS[key].to_string(), value);
            }
            Value::Object(map)
        }),
        1 => proptest::collection::vec(scalar(), 0..3).prop_map(Value::Array),
    ]
}

fn record() -> impl Strategy<Value = Value> {
    proptest::collection::vec((0..KEYS.len(), field()), 0..5).prop_map(|fields| {
        let mut map = Map::new();
        for (key, value) in fields {
            map.insert(KEYS[key].to_string(), value);
        }
        Value::Object(map)
    })
}

fn records() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(record(), 0..30)
}

/// Dotted leaf paths of `value`; non-empty containers are expanded.
fn leaf_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    let children: Vec<(String, &Value)> = match value {
        Value::Object(map) if !map.is_empty() => {
            map.iter().map(|(key, child)| (key.clone(), child)).collect()
        }
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .enumerate()
            .map(|(index, child)| (index.to_string(), child))
            .collect(),
        _ => {
            out.insert(prefix.to_string());
            return;
        }
    };
    for (segment, child) in children {
        leaf_paths(child, &format!("{prefix}.{segment}"), out);
    }
}

fn distinct_paths(records: &[Value]) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    for record in records {
        for (key, value) in record.as_object().unwrap() {
            leaf_paths(value, key, &mut paths);
        }
    }
    paths
}

proptest! {
    #[test]
    fn prop_tracked_keys_match_flattened_paths(records in records()) {
        let analysis = analyze(&records).unwrap();
        let paths = distinct_paths(&records);
        for path in &paths {
            prop_assert!(analysis.keys().contains(path));
        }
        prop_assert_eq!(analysis.keys().len(), paths.len());
    }

    #[test]
    fn prop_value_counts_sum_to_occurrences(records in records()) {
        let analysis = analyze(&records).unwrap();
        for stat in analysis.keys().iter() {
            prop_assert_eq!(stat.values.total_occurrences(), stat.occurrences);
            let kinds: u64 = stat
                .types
                .iter()
                .filter(|(kind, _)| *kind != ValueKind::Absent)
                .map(|(_, kind_stat)| kind_stat.occurrences)
                .sum();
            prop_assert_eq!(kinds, stat.occurrences);
        }
    }

    #[test]
    fn prop_presence_and_absence_cover_all_records(records in records()) {
        let analysis = analyze(&records).unwrap();
        let total = records.len() as u64;
        for stat in analysis.keys().iter() {
            let absent = stat.types.absent().map_or(0, |absent| absent.occurrences);
            prop_assert_eq!(stat.occurrences + absent, total);
        }
    }

    #[test]
    fn prop_boolean_split_covers_all_records(records in records()) {
        let report = analyze(&records).unwrap().report();
        for entry in report.iter() {
            let total = entry.percentage_true
                + entry.percentage_false
                + entry.percentage_non_boolean;
            prop_assert!((total - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_profiling_is_deterministic(records in records()) {
        let first = analyze(&records).unwrap();
        let second = analyze(&records).unwrap();
        prop_assert_eq!(first.keys(), second.keys());
        prop_assert_eq!(first.report(), second.report());
    }
}
