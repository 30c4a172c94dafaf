//! Persisted user preferences for the tier list engine.
//! 排名清單引擎的使用者偏好設定。

pub mod preferences;

pub use preferences::{
    AutosavePreferences, Preferences, PreferencesError, StoragePreferences, PREFERENCES_FILE,
};
