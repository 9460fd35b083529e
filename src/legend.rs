//! Persisted legend preferences.
//!
//! The user's show/hide choice per sensor lives under one global key in a
//! client-local key-value store. Reads merge persisted choices with the
//! computed defaults for the sensors currently loaded; writes merge new
//! toggles into whatever was persisted last.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::series::SensorSeries;

/// Storage key for the legend map. Shared by every chart and every file.
pub const LEGEND_STORAGE_KEY: &str = "legend_selection";

/// Errors raised by a key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal string key-value capability backing persisted UI state
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file on disk.
///
/// The file is re-read on every access so several handles on the same path
/// observe each other's writes (last writer wins).
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the platform config directory
    pub fn default_location() -> Result<Self, StoreError> {
        crate::settings::AnalyzerSettings::get_config_dir()
            .map(|dir| Self::new(dir.join("local_storage.json")))
            .ok_or(StoreError::NoConfigDir)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Resolved visibility for the series currently loaded, in series order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegendState {
    entries: Vec<(String, bool)>,
}

impl LegendState {
    pub fn new(entries: Vec<(String, bool)>) -> Self {
        Self { entries }
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or(false)
    }

    /// Update one entry; unknown names are ignored
    pub fn set_visible(&mut self, name: &str, visible: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = visible;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<String, bool> {
        self.entries.iter().cloned().collect()
    }
}

/// Reads and writes legend preferences through a [`KeyValueStore`]
#[derive(Clone, Debug)]
pub struct LegendMemory<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LegendMemory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current persisted map. Missing or malformed JSON reads as empty.
    pub fn persisted(&self) -> BTreeMap<String, bool> {
        let Some(raw) = self.store.get(LEGEND_STORAGE_KEY) else {
            return BTreeMap::new();
        };

        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Ignoring malformed legend preferences: {}", e);
                BTreeMap::new()
            }
        }
    }

    /// Visibility for each series: persisted choice if any, else its default
    pub fn resolve(&self, series: &[SensorSeries]) -> LegendState {
        let persisted = self.persisted();
        LegendState::new(
            series
                .iter()
                .map(|s| {
                    let visible = persisted.get(&s.name).copied().unwrap_or(s.default_visible);
                    (s.name.clone(), visible)
                })
                .collect(),
        )
    }

    /// Merge toggled entries into the persisted map and write it back.
    ///
    /// Returns the merged map. A failed write is logged; the merged map is
    /// still returned so the caller's view stays consistent.
    pub fn record_toggle(&self, changes: &BTreeMap<String, bool>) -> BTreeMap<String, bool> {
        let mut merged = self.persisted();
        merged.extend(changes.iter().map(|(k, v)| (k.clone(), *v)));

        match serde_json::to_string(&merged) {
            Ok(json) => {
                if let Err(e) = self.store.set(LEGEND_STORAGE_KEY, &json) {
                    tracing::warn!("Failed to persist legend preferences: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize legend preferences: {}", e),
        }

        merged
    }
}
