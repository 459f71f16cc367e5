//! Cache of prior roadmap prompts.
//!
//! Records are kept newest first and capped at `capacity`. Keys are matched
//! exactly: no case folding or whitespace normalisation, so `"rust"` and
//! `"rust "` are different prompts.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::json;

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("prompt store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt store is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A cached (prompt, result) pair. Serialized with the field names the
/// browser build used for its `prompts` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub prompt: String,
    #[serde(rename = "roadmap")]
    pub result: Value,
}

/// Keyed store behind the prompt cache.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Inserts `key` as the newest record and keeps at most `capacity` records.
    fn put(&self, key: &str, value: Value, capacity: usize) -> Result<(), StoreError>;

    /// All records, newest first.
    fn records(&self) -> Result<Vec<PromptRecord>, StoreError>;
}

fn find(records: &[PromptRecord], key: &str) -> Option<Value> {
    records
        .iter()
        .find(|r| r.prompt == key)
        .map(|r| r.result.clone())
}

fn insert_newest(records: &mut Vec<PromptRecord>, key: &str, value: Value, capacity: usize) {
    records.retain(|r| r.prompt != key);
    records.insert(
        0,
        PromptRecord {
            prompt: key.to_string(),
            result: value,
        },
    );
    records.truncate(capacity);
}

/// Process-local store, used by tests and when persistence is disabled.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<PromptRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(find(&records, key))
    }

    fn put(&self, key: &str, value: Value, capacity: usize) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        insert_newest(&mut records, key, value, capacity);
        Ok(())
    }

    fn records(&self) -> Result<Vec<PromptRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

/// JSON file holding the record list.
///
/// Another process may write the same file, so every `put` re-reads it
/// before modifying and replaces it through a uniquely named temp file in
/// the same directory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<PromptRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(json::from_slice_unbounded(raw.as_bytes())?)
    }

    fn save(&self, records: &[PromptRecord]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(records)?)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(find(&self.load()?, key))
    }

    fn put(&self, key: &str, value: Value, capacity: usize) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = match self.load() {
            Ok(records) => records,
            Err(StoreError::Serde(e)) => {
                warn!(path = %self.path.display(), "discarding unreadable prompt store: {e}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        insert_newest(&mut records, key, value, capacity);
        self.save(&records)
    }

    fn records(&self) -> Result<Vec<PromptRecord>, StoreError> {
        self.load()
    }
}

/// Exact-match prompt cache over a `KeyValueStore`.
///
/// Store failures never fail a request: a broken read is a miss and a broken
/// write only loses the cache entry.
#[derive(Clone)]
pub struct PromptCache {
    store: Arc<dyn KeyValueStore>,
    capacity: usize,
}

impl PromptCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_capacity(store, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(store: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self { store, capacity }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn lookup(&self, prompt: &str) -> Option<Value> {
        match self.store.get(prompt) {
            Ok(hit) => {
                debug!(hit = hit.is_some(), "prompt cache lookup");
                hit
            }
            Err(e) => {
                warn!("prompt cache lookup failed: {e}");
                None
            }
        }
    }

    pub fn store(&self, prompt: &str, result: Value) {
        if let Err(e) = self.store.put(prompt, result, self.capacity) {
            warn!("prompt cache write failed: {e}");
        }
    }

    /// Cached prompts, newest first.
    pub fn history(&self) -> Vec<PromptRecord> {
        self.store.records().unwrap_or_else(|e| {
            warn!("prompt cache read failed: {e}");
            Vec::new()
        })
    }
}
