//! The result of profiling a record set.

use std::collections::HashMap;

use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::Serialize;

use crate::analyzers::flatten::FlatRecord;
use crate::analyzers::report::Report;
use crate::analyzers::types::KeyStat;

/// Per-key statistics in key discovery order, addressable by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyStatMap {
    stats: Vec<KeyStat>,
    positions: HashMap<String, usize>,
}

impl KeyStatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&KeyStat> {
        self.positions.get(path).map(|&position| &self.stats[position])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.positions.contains_key(path)
    }

    /// Paths in discovery order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.stats.iter().map(|stat| stat.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyStat> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Returns the stat for `path`, appending a fresh one if the path is new.
    /// The flag is `true` when the entry was created by this call.
    pub(crate) fn get_or_insert(&mut self, path: &str) -> (&mut KeyStat, bool) {
        match self.positions.get(path) {
            Some(&position) => (&mut self.stats[position], false),
            None => {
                self.stats.push(KeyStat::new(path));
                let position = self.stats.len() - 1;
                self.positions.insert(path.to_string(), position);
                (&mut self.stats[position], true)
            }
        }
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut KeyStat> {
        self.stats.iter_mut()
    }
}

impl Serialize for KeyStatMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stats.len()))?;
        for stat in &self.stats {
            map.serialize_entry(&stat.path, stat)?;
        }
        map.end()
    }
}

/// Raw profiling result: per-key statistics plus the flattened snapshot they
/// were computed from.
///
/// An `Analysis` owns its snapshot; nothing in it aliases the caller's input.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    keys: KeyStatMap,
    original: Vec<FlatRecord>,
}

impl Analysis {
    pub(crate) fn new(keys: KeyStatMap, original: Vec<FlatRecord>) -> Self {
        Self { keys, original }
    }

    /// Per-key statistics in key discovery order.
    pub fn keys(&self) -> &KeyStatMap {
        &self.keys
    }

    /// Statistics for one flattened path.
    pub fn key(&self, path: &str) -> Option<&KeyStat> {
        self.keys.get(path)
    }

    /// The flattened records the statistics were computed from.
    pub fn original(&self) -> &[FlatRecord] {
        &self.original
    }

    pub fn record_count(&self) -> usize {
        self.original.len()
    }

    /// Derives the summarized per-key view. Never modifies `self`.
    pub fn report(&self) -> Report {
        Report::from_analysis(self)
    }
}

impl Serialize for Analysis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Analysis", 2)?;
        state.serialize_field("keys", &self.keys)?;
        state.serialize_field("original", &self.original)?;
        state.end()
    }
}
