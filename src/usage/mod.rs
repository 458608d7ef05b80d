//! Usage counters persisted as JSON files.
//!
//! Each counter file maps a key (player id, user agent, chat user) to the
//! number of times it was seen. Writes are read-modify-write on the whole
//! file, serialized through a mutex; a failed write is logged and the
//! request proceeds.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

/// One counter file.
pub struct UsageLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl UsageLog {
    /// Counter stored at `dir/file_name`. The directory is created on the
    /// first write.
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
            lock: Mutex::new(()),
        }
    }

    /// Increment the counter for `key`. Never fails the caller.
    pub fn record(&self, key: &str) {
        let _guard = match self.lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut counts = self.read_counts();
        *counts.entry(key.to_string()).or_insert(0) += 1;

        if let Err(err) = self.write_counts(&counts) {
            warn!("usage log {} not updated: {err}", self.path.display());
        }
    }

    /// Current count for `key`.
    pub fn count(&self, key: &str) -> u64 {
        self.read_counts().get(key).copied().unwrap_or(0)
    }

    fn read_counts(&self) -> BTreeMap<String, u64> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        }
    }

    fn write_counts(&self, counts: &BTreeMap<String, u64>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(counts)?;
        std::fs::write(&self.path, contents)
    }
}
