//! In-memory record source.

use async_trait::async_trait;
use serde_json::Value;

use super::RecordSource;
use crate::error::Result;

/// Records already held in memory, e.g. a decoded API response.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    records: Vec<Value>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, records: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn load(&self) -> Result<Vec<Value>> {
        Ok(self.records.clone())
    }

    fn description(&self) -> String {
        format!("in-memory records: {} ({} records)", self.name, self.records.len())
    }
}
