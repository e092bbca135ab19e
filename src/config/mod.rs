//! Configuration management for the mentor
//!
//! `Config` holds application-level preferences on disk. The mentor settings
//! the user toggles from the popup (hint mode, notifications, ...) live in the
//! sync storage scope instead, see [`settings`].

pub mod settings;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

pub use settings::{HintMode, SettingsRecord};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Simulated latency before hints are delivered (milliseconds)
    #[serde(default = "default_hint_delay_ms")]
    pub hint_delay_ms: u64,

    /// Simulated latency before a mentor answer is delivered (milliseconds)
    #[serde(default = "default_answer_delay_ms")]
    pub answer_delay_ms: u64,

    /// Write logs to a file in the data directory while the TUI is running
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
}

fn default_hint_delay_ms() -> u64 {
    1000
}

fn default_answer_delay_ms() -> u64 {
    1500
}

fn default_log_to_file() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Mentor Dark".to_string(),
            custom_theme: None,
            hint_delay_ms: default_hint_delay_ms(),
            answer_delay_ms: default_answer_delay_ms(),
            log_to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "coding-mentor")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "coding-mentor")
            .context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the log file path used by the TUI
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("mentor.log"))
    }

    pub fn hint_delay(&self) -> Duration {
        Duration::from_millis(self.hint_delay_ms)
    }

    pub fn answer_delay(&self) -> Duration {
        Duration::from_millis(self.answer_delay_ms)
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        self.custom_theme.clone().unwrap_or_else(Theme::mentor_dark)
    }
}
