//! Mentor settings persisted in the sync storage scope
//!
//! Each field is its own storage key so the popup can read or flip one
//! setting without touching the others.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::{StorageArea, StorageError, Store};

const HINT_MODE_KEY: &str = "hintMode";
const TIMED_DELAY_KEY: &str = "timedDelay";
const NOTIFICATIONS_KEY: &str = "enableNotifications";
const TRACK_PROGRESS_KEY: &str = "trackProgress";

/// How hints are released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintMode {
    /// Only when the user asks
    #[default]
    Click,
    /// Automatically after `timed_delay` seconds
    Timed,
}

impl FromStr for HintMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "click" => Ok(Self::Click),
            "timed" => Ok(Self::Timed),
            other => Err(format!("Unknown hint mode: {}. Options: click, timed", other)),
        }
    }
}

impl fmt::Display for HintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Click => "click",
            Self::Timed => "timed",
        })
    }
}

/// User-facing mentor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    pub hint_mode: HintMode,
    /// Seconds between automatic hints in timed mode
    pub timed_delay: u64,
    pub enable_notifications: bool,
    pub track_progress: bool,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self { hint_mode: HintMode::Click, timed_delay: 30, enable_notifications: true, track_progress: true }
    }
}

impl SettingsRecord {
    /// Read settings, substituting defaults for missing or unreadable keys
    pub fn load(store: &Store) -> Self {
        let defaults = Self::default();
        let stored = match store.get_many(
            StorageArea::Sync,
            &[HINT_MODE_KEY, TIMED_DELAY_KEY, NOTIFICATIONS_KEY, TRACK_PROGRESS_KEY],
        ) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Failed to load settings, using defaults: {}", e);
                return defaults;
            }
        };

        let field = |key: &str| stored.get(key).cloned();
        Self {
            hint_mode: field(HINT_MODE_KEY)
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or(defaults.hint_mode),
            timed_delay: field(TIMED_DELAY_KEY)
                .and_then(|v| v.as_u64())
                .unwrap_or(defaults.timed_delay),
            enable_notifications: field(NOTIFICATIONS_KEY)
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.enable_notifications),
            track_progress: field(TRACK_PROGRESS_KEY)
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.track_progress),
        }
    }

    /// Write every setting
    pub fn save(&self, store: &Store) -> Result<(), StorageError> {
        store.set_many(
            StorageArea::Sync,
            [
                (HINT_MODE_KEY.to_string(), serde_json::to_value(self.hint_mode)?),
                (TIMED_DELAY_KEY.to_string(), Value::from(self.timed_delay)),
                (NOTIFICATIONS_KEY.to_string(), Value::from(self.enable_notifications)),
                (TRACK_PROGRESS_KEY.to_string(), Value::from(self.track_progress)),
            ],
        )
    }

    /// First-run defaults, written only when nothing is stored yet
    ///
    /// Returns whether defaults were written.
    pub fn install_defaults(store: &Store) -> Result<bool, StorageError> {
        let existing = store.get_many(StorageArea::Sync, &[HINT_MODE_KEY])?;
        if !existing.is_empty() {
            return Ok(false);
        }
        Self::default().save(store)?;
        Ok(true)
    }
}
