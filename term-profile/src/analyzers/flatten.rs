//! Deep flattening of nested records into single-level path maps.
//!
//! `{"user": {"name": "ada", "tags": ["x", "y"]}}` becomes
//! `{"user.name": "ada", "user.tags.0": "x", "user.tags.1": "y"}`.
//! Empty objects and arrays are kept as leaf values. Field order follows the
//! source record.

use serde_json::{Map, Value};

use crate::error::{Result, TermError};

/// A single-level record: flattened path to leaf value, in field order.
pub type FlatRecord = Map<String, Value>;

/// Options controlling how nested records are flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Separator placed between path segments (default: `"."`)
    pub delimiter: String,
    /// Number of nesting levels to expand; top-level keys are level 1.
    /// Deeper sub-structures are kept whole. `None` expands everything.
    pub max_depth: Option<usize>,
    /// Keep arrays as leaf values instead of expanding them by index
    pub preserve_arrays: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            delimiter: ".".to_string(),
            max_depth: None,
            preserve_arrays: false,
        }
    }
}

impl FlattenOptions {
    /// Checks that the options describe a usable flattening.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(TermError::Configuration(
                "flatten delimiter must not be empty".to_string(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(TermError::Configuration(
                "flatten max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Turns nested records into [`FlatRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    options: FlattenOptions,
}

impl Flattener {
    pub fn new(options: FlattenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    /// Flattens one record. The input is only borrowed; every leaf in the
    /// output is an owned copy.
    pub fn flatten(&self, record: &Map<String, Value>) -> FlatRecord {
        let mut out = FlatRecord::new();
        for (key, value) in record {
            self.visit(value, key.clone(), 1, &mut out);
        }
        out
    }

    fn visit(&self, value: &Value, path: String, depth: usize, out: &mut FlatRecord) {
        match value {
            Value::Object(map) if !map.is_empty() && self.descends(depth) => {
                for (key, child) in map {
                    self.visit(child, self.join(&path, key), depth + 1, out);
                }
            }
            Value::Array(items)
                if !items.is_empty() && !self.options.preserve_arrays && self.descends(depth) =>
            {
                for (index, child) in items.iter().enumerate() {
                    self.visit(child, self.join(&path, &index.to_string()), depth + 1, out);
                }
            }
            _ => {
                out.insert(path, value.clone());
            }
        }
    }

    fn descends(&self, depth: usize) -> bool {
        self.options.max_depth.map_or(true, |max| depth < max)
    }

    fn join(&self, prefix: &str, segment: &str) -> String {
        let mut path =
            String::with_capacity(prefix.len() + self.options.delimiter.len() + segment.len());
        path.push_str(prefix);
        path.push_str(&self.options.delimiter);
        path.push_str(segment);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn keys(record: &FlatRecord) -> Vec<&str> {
        record.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_flat_record_is_unchanged() {
        let input = object(json!({"b": 1, "a": "x", "c": null}));
        let flat = Flattener::default().flatten(&input);
        assert_eq!(keys(&flat), vec!["b", "a", "c"]);
        assert_eq!(flat, input);
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let input = object(json!({
            "id": 7,
            "user": {"name": "ada", "tags": ["x", "y"]},
            "active": true
        }));
        let flat = Flattener::default().flatten(&input);

        assert_eq!(
            keys(&flat),
            vec!["id", "user.name", "user.tags.0", "user.tags.1", "active"]
        );
        assert_eq!(flat["user.tags.1"], json!("y"));
    }

    #[test]
    fn test_empty_containers_are_leaves() {
        let input = object(json!({"meta": {}, "items": [], "deep": {"inner": {}}}));
        let flat = Flattener::default().flatten(&input);
        assert_eq!(flat["meta"], json!({}));
        assert_eq!(flat["items"], json!([]));
        assert_eq!(flat["deep.inner"], json!({}));
    }

    #[test]
    fn test_custom_delimiter() {
        let flattener = Flattener::new(FlattenOptions {
            delimiter: "/".to_string(),
            ..Default::default()
        });
        let flat = flattener.flatten(&object(json!({"a": {"b": [1]}})));
        assert_eq!(keys(&flat), vec!["a/b/0"]);
    }

    #[test]
    fn test_max_depth() {
        let input = object(json!({"a": {"b": {"c": 1}}, "d": 2}));

        let flat = Flattener::new(FlattenOptions {
            max_depth: Some(2),
            ..Default::default()
        })
        .flatten(&input);
        assert_eq!(flat["a.b"], json!({"c": 1}));
        assert_eq!(flat["d"], json!(2));

        let flat = Flattener::new(FlattenOptions {
            max_depth: Some(1),
            ..Default::default()
        })
        .flatten(&input);
        assert_eq!(flat["a"], json!({"b": {"c": 1}}));
    }

    #[test]
    fn test_preserve_arrays() {
        let flat = Flattener::new(FlattenOptions {
            preserve_arrays: true,
            ..Default::default()
        })
        .flatten(&object(json!({"tags": ["x", {"y": 1}], "o": {"k": 1}})));
        assert_eq!(flat["tags"], json!(["x", {"y": 1}]));
        assert_eq!(flat["o.k"], json!(1));
    }

    #[test]
    fn test_options_validation() {
        assert!(FlattenOptions::default().validate().is_ok());

        let empty = FlattenOptions {
            delimiter: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(TermError::Configuration(_))
        ));

        let zero = FlattenOptions {
            max_depth: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }
}
