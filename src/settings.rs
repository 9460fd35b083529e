//! User settings persistence.
//!
//! This module handles loading and saving analyzer preferences across sessions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::series::SeriesConfig;

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Base URL of the rig monitoring backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Live mode polling interval in milliseconds
    #[serde(default = "default_polling_interval_ms")]
    pub polling_interval_ms: u64,
    /// Sensor name markers shown by default for log files
    #[serde(default = "default_visible_markers")]
    pub default_visible_markers: BTreeSet<String>,
    /// Sensor name markers shown by default for live board data
    #[serde(default = "default_live_visible_markers")]
    pub live_visible_markers: BTreeSet<String>,
    /// Padding in °C added around the data range on the Y axis
    #[serde(default = "default_y_axis_margin")]
    pub y_axis_margin: f64,
    /// Delay before a container resize is applied to the chart
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
}

fn default_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8020".to_string()
}

fn default_polling_interval_ms() -> u64 {
    5000
}

fn default_visible_markers() -> BTreeSet<String> {
    ["CPU", "DDR"].into_iter().map(String::from).collect()
}

fn default_live_visible_markers() -> BTreeSet<String> {
    ["CPU", "DDR", "MIN"].into_iter().map(String::from).collect()
}

fn default_y_axis_margin() -> f64 {
    5.0
}

fn default_resize_debounce_ms() -> u64 {
    100
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            api_base_url: default_api_base_url(),
            polling_interval_ms: default_polling_interval_ms(),
            default_visible_markers: default_visible_markers(),
            live_visible_markers: default_live_visible_markers(),
            y_axis_margin: default_y_axis_margin(),
            resize_debounce_ms: default_resize_debounce_ms(),
        }
    }
}

impl AnalyzerSettings {
    /// Get the config directory path for rigtemp
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("RigTemp"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("RigTemp"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("rigtemp"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Invalid settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }

    /// Series configuration for log files
    pub fn file_series_config(&self) -> SeriesConfig {
        SeriesConfig {
            default_visible_markers: self.default_visible_markers.clone(),
        }
    }

    /// Series configuration for live board data
    pub fn live_series_config(&self) -> SeriesConfig {
        SeriesConfig {
            default_visible_markers: self.live_visible_markers.clone(),
        }
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}
