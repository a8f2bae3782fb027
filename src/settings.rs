use std::path::Path;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::storage::{read_json, write_json, StorageError};
use crate::streaming::{DEFAULT_CAPACITY, DEFAULT_INTERVAL};

const SETTINGS_VERSION: u32 = 1;

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_interval() -> i64 {
    DEFAULT_INTERVAL
}

fn default_capacity() -> i64 {
    DEFAULT_CAPACITY
}

/// Editor settings stored in the OS config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EditorSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Reject edits to fields the form does not show instead of storing them.
    #[serde(default)]
    pub enforce_visibility: bool,
    /// Interval (ms) shown when a streaming row has none stored.
    #[serde(default = "default_interval")]
    #[ts(type = "number")]
    pub default_streaming_interval: i64,
    /// Capacity shown when a streaming row has none stored.
    #[serde(default = "default_capacity")]
    #[ts(type = "number")]
    pub default_streaming_capacity: i64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            enforce_visibility: false,
            default_streaming_interval: DEFAULT_INTERVAL,
            default_streaming_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Load settings from the app config directory. Returns None if no settings file exists.
pub fn load_settings(app_config_dir: &Path) -> Option<EditorSettings> {
    let path = crate::paths::settings_path(app_config_dir);
    if !path.exists() {
        return None;
    }
    match read_json::<EditorSettings>(&path) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            None
        }
    }
}

/// Load settings from an explicit file.
pub fn load_settings_file(path: &Path) -> Result<EditorSettings, StorageError> {
    read_json(path)
}

pub fn save_settings(app_config_dir: &Path, settings: &EditorSettings) -> Result<(), StorageError> {
    std::fs::create_dir_all(app_config_dir)?;
    write_json(&crate::paths::settings_path(app_config_dir), settings)
}
