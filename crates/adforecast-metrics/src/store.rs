//! Persisted key-value state.
//!
//! Values are stored as JSON strings under flat string keys, the same shape
//! the wizard keeps in browser storage. A value that fails to decode is a
//! per-key problem ([`StoreError::MalformedEntry`]) and never poisons the
//! rest of the store.

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const METRICS_KEY_PREFIX: &str = "historicalMetrics_";
pub const SELECTED_LOCATIONS_KEY: &str = "selectedLocations";
pub const REAL_CPC_KEY: &str = "realCPC";

/// Cache key for a site's historical metrics.
///
/// Blank or absent URLs share the `historicalMetrics_default` entry.
#[must_use]
pub fn metrics_cache_key(site_url: Option<&str>) -> String {
    match site_url.map(str::trim).filter(|s| !s.is_empty()) {
        Some(url) => format!("{METRICS_KEY_PREFIX}{url}"),
        None => format!("{METRICS_KEY_PREFIX}default"),
    }
}

/// Cached result of a successful remote metrics call. No expiry is applied;
/// `fetched_at` is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalMetricsCacheEntry {
    pub avg_cpc: f64,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Flat string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Implementation-specific I/O failures.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Implementation-specific I/O failures.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Returns whether the key was present.
    ///
    /// # Errors
    ///
    /// Implementation-specific I/O failures.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// # Errors
    ///
    /// Implementation-specific I/O failures.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Decode the JSON value under `key`.
///
/// # Errors
///
/// Returns [`StoreError::MalformedEntry`] if the stored string is not valid
/// JSON for `T`, or any error from the store itself.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::MalformedEntry {
            key: key.to_owned(),
            source: e,
        })
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns [`StoreError::Encode`] if serialization fails, or any error from
/// the store itself.
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}

/// Remove every key starting with [`METRICS_KEY_PREFIX`]. Returns the number
/// of entries removed.
///
/// # Errors
///
/// Any error from the store.
pub fn clear_metrics_entries(store: &dyn KeyValueStore) -> Result<usize, StoreError> {
    let mut removed = 0;
    for key in store.keys()? {
        if key.starts_with(METRICS_KEY_PREFIX) && store.remove(&key)? {
            removed += 1;
        }
    }
    Ok(removed)
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// Store backed by a single JSON object file.
///
/// The whole file is loaded on open and rewritten on every mutation through a
/// temporary sibling file and a rename, so readers never see a partial write.
/// The in-memory copy only changes once the write has succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; the file
    /// and its parent directory are created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Corrupt`] if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut file = std::fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(&body).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        next.insert(key.to_owned(), value);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(false);
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}
