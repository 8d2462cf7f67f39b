//! Durable key-value cache that outlives a bridge instance.
//!
//! Behaves like browser `localStorage`: string keys, string values, every
//! write persisted immediately. The bridge only uses it for the last known
//! ledger transaction count.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Key under which the ledger transaction count is stored.
pub const TRANSACTION_COUNT_KEY: &str = "transactionCount";

/// Errors from reading or writing the cache file.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A thread-safe string cache, optionally backed by a JSON file.
#[derive(Debug, Clone, Default)]
pub struct KeyValueCache {
    inner: Arc<DashMap<String, String>>,
    persistence_path: Option<PathBuf>,
}

impl KeyValueCache {
    /// Create an empty cache. Nothing is written when `path` is `None`.
    pub fn new(persistence_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Cache with no backing file.
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    /// Load from file if it exists.
    pub fn load_from_file(path: &Path) -> Result<Self, CacheError> {
        let cache = Self::new(Some(path.to_path_buf()));
        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let map: BTreeMap<String, String> = serde_json::from_reader(reader)?;

            for (k, v) in map {
                cache.inner.insert(k, v);
            }
            tracing::debug!(path = ?path, entries = cache.inner.len(), "Loaded cache file");
        }
        Ok(cache)
    }

    /// Load from file, starting empty if the file is unreadable.
    ///
    /// The file is still used for later writes.
    pub fn open(path: &Path) -> Self {
        Self::load_from_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = ?path, error = %e, "Ignoring unreadable cache file");
            Self::new(Some(path.to_path_buf()))
        })
    }

    /// Save to file.
    pub fn save_to_file(&self) -> Result<(), CacheError> {
        if let Some(path) = &self.persistence_path {
            let map: BTreeMap<_, _> = self
                .inner
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect();

            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer(writer, &map)?;
        }
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    /// Store a value and persist it.
    pub fn set_item(&self, key: &str, value: impl Into<String>) -> Result<(), CacheError> {
        self.inner.insert(key.to_string(), value.into());
        self.save_to_file()
    }

    /// Last cached ledger transaction count.
    ///
    /// Unparseable values read as absent.
    pub fn transaction_count(&self) -> Option<u64> {
        self.get_item(TRANSACTION_COUNT_KEY)?.trim().parse().ok()
    }

    pub fn set_transaction_count(&self, count: u64) -> Result<(), CacheError> {
        self.set_item(TRANSACTION_COUNT_KEY, count.to_string())
    }
}
