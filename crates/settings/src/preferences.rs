use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tierlist_persistence::write_atomic;

/// 預設的偏好設定檔名。 / File name of the preferences document under the data root.
pub const PREFERENCES_FILE: &str = "preferences.json";

const CURRENT_VERSION: u32 = 1;
const DEFAULT_INTERVAL_SECS: u64 = 30;
const INTERVAL_RANGE_SECS: (u64, u64) = (5, 3600);

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("cannot access preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("preferences at {path} are not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 使用者偏好設定。 / User preferences that shape an engine session.
///
/// Every field falls back to its default when absent, and [`Preferences::load`]
/// sanitizes out-of-range values, so an older or hand-edited file always loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub version: u32,
    pub autosave: AutosavePreferences,
    pub storage: StoragePreferences,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            autosave: AutosavePreferences::default(),
            storage: StoragePreferences::default(),
        }
    }
}

impl Preferences {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref();
        let mut preferences = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str::<Self>(&text).map_err(|source| {
                PreferencesError::Json {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(PreferencesError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        preferences.sanitize();
        Ok(preferences)
    }

    /// 以原子方式寫回。 / Writes the sanitized preferences atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let path = path.as_ref();
        let mut sanitized = self.clone();
        sanitized.sanitize();
        let json = serde_json::to_string_pretty(&sanitized).map_err(|source| {
            PreferencesError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        write_atomic(path, json.as_bytes()).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn sanitize(&mut self) {
        if self.version == 0 {
            self.version = CURRENT_VERSION;
        }
        self.autosave.sanitize();
        self.storage.sanitize();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosavePreferences {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for AutosavePreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl AutosavePreferences {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    fn sanitize(&mut self) {
        let (min, max) = INTERVAL_RANGE_SECS;
        self.interval_secs = match self.interval_secs {
            0 => DEFAULT_INTERVAL_SECS,
            secs => secs.clamp(min, max),
        };
    }
}

/// 儲存位置，相對於資料根目錄。 / Storage locations, relative to the data root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoragePreferences {
    pub autosave_file: String,
    pub library_dir: String,
}

impl Default for StoragePreferences {
    fn default() -> Self {
        Self {
            autosave_file: "autosave.json".into(),
            library_dir: "saved".into(),
        }
    }
}

impl StoragePreferences {
    fn sanitize(&mut self) {
        let defaults = Self::default();
        if self.autosave_file.trim().is_empty() {
            self.autosave_file = defaults.autosave_file;
        }
        if self.library_dir.trim().is_empty() {
            self.library_dir = defaults.library_dir;
        }
    }
}
