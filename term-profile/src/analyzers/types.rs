//! Per-key statistics accumulated by the record profiler.

use std::collections::{BTreeMap, HashMap};

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analyzers::value::{ValueKey, ValueKind};

/// Occurrence count of one distinct value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: Value,
    pub occurrences: u64,
}

/// Distinct values seen for a key, in first-seen order.
///
/// Identity is strict: values of different kinds never match each other.
#[derive(Debug, Clone, Default)]
pub struct ValueStats {
    entries: Vec<ValueCount>,
    index: HashMap<ValueKey, usize>,
}

impl ValueStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more occurrence of `value`, creating its entry on first sight.
    /// Returns the updated count.
    pub fn record_occurrence(&mut self, value: &Value) -> u64 {
        let key = ValueKey::of(value);
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                self.entries.push(ValueCount {
                    value: value.clone(),
                    occurrences: 0,
                });
                let position = self.entries.len() - 1;
                self.index.insert(key, position);
                position
            }
        };
        let entry = &mut self.entries[position];
        entry.occurrences += 1;
        entry.occurrences
    }

    /// Number of times `value` was recorded, if it was seen at all.
    pub fn occurrences_of(&self, value: &Value) -> Option<u64> {
        self.index
            .get(&ValueKey::of(value))
            .map(|&position| self.entries[position].occurrences)
    }

    /// Distinct values in first-seen order.
    pub fn distinct_values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|entry| &entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all per-value occurrence counts.
    pub fn total_occurrences(&self) -> u64 {
        self.entries.iter().map(|entry| entry.occurrences).sum()
    }
}

impl PartialEq for ValueStats {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Serialize for ValueStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

/// True / false / other split of a boolean-bearing key over all records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BooleanPercentages {
    #[serde(rename = "true")]
    pub percent_true: f64,
    #[serde(rename = "false")]
    pub percent_false: f64,
    #[serde(rename = "other")]
    pub percent_other: f64,
}

impl BooleanPercentages {
    pub fn total(&self) -> f64 {
        self.percent_true + self.percent_false + self.percent_other
    }
}

/// Occurrences of one value kind, plus kind-specific derived fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeStat {
    pub occurrences: u64,
    /// Median of the key's numeric values (`number` kind only)
    pub median: Option<f64>,
    /// Boolean split (`boolean` kind only)
    pub percentages: Option<BooleanPercentages>,
}

impl TypeStat {
    fn seeded(occurrences: u64) -> Self {
        Self {
            occurrences,
            ..Default::default()
        }
    }
}

impl Serialize for TypeStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.median.is_some()) + usize::from(self.percentages.is_some());
        let mut state = serializer.serialize_struct("TypeStat", len)?;
        state.serialize_field("occurrences", &self.occurrences)?;
        if let Some(median) = self.median {
            state.serialize_field("median", &median)?;
        }
        if let Some(percentages) = &self.percentages {
            state.serialize_field("percentages", percentages)?;
        }
        state.end()
    }
}

/// Value kinds observed for a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeStats {
    kinds: BTreeMap<ValueKind, TypeStat>,
}

impl TypeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ValueKind) -> Option<&TypeStat> {
        self.kinds.get(&kind)
    }

    pub fn contains(&self, kind: ValueKind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Adds one occurrence of `kind`, creating the entry at zero first.
    pub fn increment(&mut self, kind: ValueKind) {
        self.kinds.entry(kind).or_default().occurrences += 1;
    }

    /// Creates the entry for `kind` with a starting count, unless it exists.
    pub fn seed(&mut self, kind: ValueKind, occurrences: u64) {
        self.kinds
            .entry(kind)
            .or_insert_with(|| TypeStat::seeded(occurrences));
    }

    pub fn number(&self) -> Option<&TypeStat> {
        self.get(ValueKind::Number)
    }

    pub fn boolean(&self) -> Option<&TypeStat> {
        self.get(ValueKind::Boolean)
    }

    pub fn absent(&self) -> Option<&TypeStat> {
        self.get(ValueKind::Absent)
    }

    pub(crate) fn get_mut(&mut self, kind: ValueKind) -> Option<&mut TypeStat> {
        self.kinds.get_mut(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValueKind, &TypeStat)> {
        self.kinds.iter().map(|(kind, stat)| (*kind, stat))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Everything the profiler knows about one flattened path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyStat {
    pub path: String,
    /// Records in which the key is present, whatever its value
    pub occurrences: u64,
    pub values: ValueStats,
    pub types: TypeStats,
}

impl KeyStat {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            occurrences: 0,
            values: ValueStats::new(),
            types: TypeStats::new(),
        }
    }

    /// Records one present value for this key.
    pub fn record(&mut self, value: &Value) {
        self.occurrences += 1;
        self.values.record_occurrence(value);
        self.types.increment(ValueKind::of(value));
    }
}
