//! Persistent record store backed by a single JSON file

use crate::state::Record;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Loads and saves the full record list. Reads fail soft (the app always
/// starts in a valid state); writes replace the file atomically via a
/// temp-file rename so a later `load` never sees a partial list.
pub struct RecordStore {
    path: Option<PathBuf>,
}

impl RecordStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Return the previously saved list, or empty when the file is missing
    /// or unparseable
    pub fn load(&self) -> Vec<Record> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!("stored records unreadable, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Serialize the full list and overwrite prior content. An empty list is
    /// never written over previously saved data.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if records.is_empty() && path.exists() {
            debug!("skipping save of empty record list");
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(records)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
