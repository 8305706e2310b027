//! Human-oriented summary derived from an [`Analysis`].

use std::collections::HashMap;

use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::analyzers::analysis::Analysis;
use crate::analyzers::stats::percentage;
use crate::analyzers::types::KeyStat;

/// Share of records holding one particular value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuePercentage {
    pub value: Value,
    pub percentage: f64,
}

/// Summary of one flattened path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyReport {
    #[serde(skip_serializing)]
    pub path: String,
    /// Median of the numeric values, `None` when the key never held a number
    pub median: Option<f64>,
    pub percentage_true: f64,
    pub percentage_false: f64,
    /// Records where the key is missing or not a boolean; 100 when the key
    /// never held a boolean
    pub percentage_non_boolean: f64,
    /// Distinct values in first-seen order
    pub possible_values: Vec<Value>,
    pub value_percentages: Vec<ValuePercentage>,
}

impl KeyReport {
    fn from_key_stat(stat: &KeyStat, total_records: u64) -> Self {
        let median = stat.types.number().and_then(|number| number.median);

        let (percentage_true, percentage_false, percentage_non_boolean) = match stat
            .types
            .boolean()
            .and_then(|boolean| boolean.percentages)
        {
            Some(pct) => (pct.percent_true, pct.percent_false, pct.percent_other),
            None => (0.0, 0.0, 100.0),
        };

        let possible_values: Vec<Value> = stat.values.distinct_values().cloned().collect();
        let value_percentages = possible_values
            .iter()
            .map(|value| ValuePercentage {
                value: value.clone(),
                percentage: stat
                    .values
                    .occurrences_of(value)
                    .map_or(0.0, |count| percentage(count, total_records)),
            })
            .collect();

        Self {
            path: stat.path.clone(),
            median,
            percentage_true,
            percentage_false,
            percentage_non_boolean,
            possible_values,
            value_percentages,
        }
    }

    /// Value percentages sorted by share, highest first. Ties keep
    /// first-seen order.
    pub fn most_common(&self) -> Vec<&ValuePercentage> {
        let mut sorted: Vec<&ValuePercentage> = self.value_percentages.iter().collect();
        sorted.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        sorted
    }
}

/// Read-only per-path summary of an analysis, in key discovery order.
///
/// Building a report never touches the analysis it came from, and the same
/// analysis always yields an equal report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    record_count: usize,
    entries: Vec<KeyReport>,
    positions: HashMap<String, usize>,
}

impl Report {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let total_records = analysis.record_count() as u64;
        let entries: Vec<KeyReport> = analysis
            .keys()
            .iter()
            .map(|stat| KeyReport::from_key_stat(stat, total_records))
            .collect();
        let positions = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.path.clone(), position))
            .collect();

        Self {
            record_count: analysis.record_count(),
            entries,
            positions,
        }
    }

    pub fn get(&self, path: &str) -> Option<&KeyReport> {
        self.positions.get(path).map(|&position| &self.entries[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyReport> {
        self.entries.iter()
    }

    /// Number of records the analysis covered.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Entries<'a>(&'a [KeyReport]);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.path, entry)?;
        }
        map.end()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Report", 2)?;
        state.serialize_field("record_count", &self.record_count)?;
        state.serialize_field("keys", &Entries(&self.entries))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzers::analyze;
    use serde_json::json;

    #[test]
    fn test_median_is_null_without_numbers() {
        let records = vec![json!({"a": 1, "d": "hey"}), json!({"a": 3})];
        let report = analyze(&records).unwrap().report();

        assert_eq!(report.get("a").unwrap().median, Some(2.0));
        assert_eq!(report.get("d").unwrap().median, None);
    }

    #[test]
    fn test_boolean_defaults_without_boolean_values() {
        let records = vec![json!({"a": true, "b": false, "c": "hey"}), json!({"a": "yo", "b": true})];
        let report = analyze(&records).unwrap().report();

        let c = report.get("c").unwrap();
        assert_eq!(c.percentage_true, 0.0);
        assert_eq!(c.percentage_false, 0.0);
        assert_eq!(c.percentage_non_boolean, 100.0);
    }

    #[test]
    fn test_value_percentages_use_total_record_count() {
        let records = vec![json!({"a": "x"}), json!({"b": 1}), json!({"a": "x"}), json!({"b": 2})];
        let report = analyze(&records).unwrap().report();

        let a = report.get("a").unwrap();
        assert_eq!(a.possible_values, vec![json!("x")]);
        assert_eq!(a.value_percentages[0].percentage, 50.0);
        assert_eq!(report.record_count(), 4);
    }

    #[test]
    fn test_most_common_orders_by_share() {
        let records = vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 2}), json!({"a": 3})];
        let report = analyze(&records).unwrap().report();

        let ordered: Vec<&serde_json::Value> = report
            .get("a")
            .unwrap()
            .most_common()
            .into_iter()
            .map(|vp| &vp.value)
            .collect();
        assert_eq!(ordered, vec![&json!(2), &json!(1), &json!(3)]);
    }

    #[test]
    fn test_report_serialization() {
        let records = vec![json!({"flag": true}), json!({"flag": false})];
        let report = analyze(&records).unwrap().report();

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "record_count": 2,
                "keys": {
                    "flag": {
                        "median": null,
                        "percentage_true": 50.0,
                        "percentage_false": 50.0,
                        "percentage_non_boolean": 0.0,
                        "possible_values": [true, false],
                        "value_percentages": [
                            {"value": true, "percentage": 50.0},
                            {"value": false, "percentage": 50.0}
                        ]
                    }
                }
            })
        );
    }
}
