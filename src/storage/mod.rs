//! Key-value storage bridge
//!
//! Two scopes mirror the browser's storage areas: `local` holds the large,
//! capped analytics log and counters, `sync` holds settings and per-problem
//! progress. Each scope is a single JSON object on disk. Every call reads or
//! rewrites the whole file, so concurrent writers race and the last write wins.

pub mod analytics;
pub mod progress;
pub mod stats;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::Config;

pub use analytics::{AnalyticsEvent, AnalyticsLog, HintUsage};
pub use progress::ProblemProgress;
pub use stats::{DailyStats, DayStats, TotalStats};

/// Storage scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// Large, device-local data
    Local,
    /// Small settings-like data
    Sync,
}

impl StorageArea {
    fn file_name(&self) -> &'static str {
        match self {
            Self::Local => "local.json",
            Self::Sync => "sync.json",
        }
    }
}

/// Errors from reading or writing a storage scope
#[derive(Debug, Error)]
pub enum StorageError {
    /// The scope file could not be read or written
    #[error("Storage I/O failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scope file is not a JSON object
    #[error("Storage file {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value does not have the expected shape
    #[error("Stored value for {key:?} has unexpected shape: {source}")]
    Shape {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized
    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed key-value store with `local` and `sync` scopes
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Store rooted in the application data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(Config::data_dir()?.join("storage")))
    }

    /// Store rooted at an explicit directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn area_path(&self, area: StorageArea) -> PathBuf {
        self.root.join(area.file_name())
    }

    fn read_area(&self, area: StorageArea) -> Result<Map<String, Value>, StorageError> {
        let path = self.area_path(area);
        if !path.exists() {
            return Ok(Map::new());
        }

        let contents =
            fs::read_to_string(&path).map_err(|source| StorageError::Io { path: path.clone(), source })?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt { path, source })
    }

    fn write_area(&self, area: StorageArea, map: &Map<String, Value>) -> Result<(), StorageError> {
        let path = self.area_path(area);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
        }

        let contents = serde_json::to_string_pretty(map)?;
        fs::write(&path, contents).map_err(|source| StorageError::Io { path, source })
    }

    /// Read one key
    pub fn get<T: DeserializeOwned>(
        &self,
        area: StorageArea,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        let mut map = self.read_area(area)?;
        match map.remove(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StorageError::Shape { key: key.to_string(), source }),
            None => Ok(None),
        }
    }

    /// Read several keys at once; missing keys are absent from the result
    pub fn get_many(&self, area: StorageArea, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let map = self.read_area(area)?;
        Ok(map.into_iter().filter(|(k, _)| keys.contains(&k.as_str())).collect())
    }

    /// Read one key, falling back to the default on absence or failure
    ///
    /// Failures are logged and swallowed.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, area: StorageArea, key: &str) -> T {
        match self.get(area, key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!("Using default for {}: {}", key, e);
                T::default()
            }
        }
    }

    /// Write one key
    pub fn set<T: Serialize + ?Sized>(
        &self,
        area: StorageArea,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        self.set_many(area, [(key.to_string(), serde_json::to_value(value)?)])
    }

    /// Write several keys in one read-modify-write
    pub fn set_many(
        &self,
        area: StorageArea,
        entries: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<(), StorageError> {
        let mut map = self.read_area(area)?;
        map.extend(entries);
        self.write_area(area, &map)
    }

    /// All keys in a scope
    pub fn keys(&self, area: StorageArea) -> Result<Vec<String>, StorageError> {
        Ok(self.read_area(area)?.into_iter().map(|(k, _)| k).collect())
    }
}
