use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::CollectError;
use crate::types::activity::ActivityRecord;

/// Records of one run in encounter order, keyed by timestamp.
#[derive(Debug, Default)]
pub struct ActivityLog {
    records: Vec<ActivityRecord>,
    sources: HashMap<String, PathBuf>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record`, read from `source`. A timestamp that is already present
    /// is rejected and the log is left unchanged.
    pub fn insert(&mut self, record: ActivityRecord, source: &Path) -> Result<(), CollectError> {
        if let Some(first) = self.sources.get(&record.timestamp) {
            return Err(CollectError::DuplicateTimestamp {
                timestamp: record.timestamp,
                first: first.clone(),
                second: source.to_path_buf(),
            });
        }

        self.sources
            .insert(record.timestamp.clone(), source.to_path_buf());
        self.records.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }
}
