//! Value kinds and strict-equality value identity.
//!
//! Every flattened field value is classified into exactly one [`ValueKind`].
//! Distinct values are tracked through [`ValueKey`], which keeps the kind as
//! part of the identity so that the number `2` and the string `"2"` never
//! collapse into the same entry.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dynamic category of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Text values
    String,
    /// Numeric values (integers and floats alike)
    Number,
    /// `true` / `false`
    Boolean,
    /// The key is missing from the record
    Absent,
    /// Anything else: `null`, empty or preserved containers
    Other,
}

impl ValueKind {
    /// Classifies a present value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null | Value::Array(_) | Value::Object(_) => ValueKind::Other,
        }
    }

    /// Classifies a possibly-missing field.
    pub fn of_field(value: Option<&Value>) -> Self {
        value.map_or(ValueKind::Absent, Self::of)
    }

    /// Lowercase name used in reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Absent => "absent",
            ValueKind::Other => "other",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite `(kind, raw)` identity of a value.
///
/// Numbers compare by their `f64` value, so `1` and `1.0` are the same value
/// and `-0.0` equals `0.0`. Containers compare structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    String(String),
    Number(u64),
    Boolean(bool),
    Null,
    Composite(String),
}

impl ValueKey {
    pub(crate) fn of(value: &Value) -> Self {
        match value {
            Value::String(s) => ValueKey::String(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f == 0.0 => ValueKey::Number(0f64.to_bits()),
                Some(f) => ValueKey::Number(f.to_bits()),
                None => ValueKey::Composite(n.to_string()),
            },
            Value::Bool(b) => ValueKey::Boolean(*b),
            Value::Null => ValueKey::Null,
            Value::Array(_) | Value::Object(_) => ValueKey::Composite(value.to_string()),
        }
    }
}

/// Short JSON type name of a value, used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
