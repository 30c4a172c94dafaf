use std::path::Path;
use std::time::Duration;

use tierlist_core::DEFAULT_FLUSH_INTERVAL;
use tierlist_persistence::StorageLayout;
use tierlist_settings::{Preferences, PREFERENCES_FILE};

/// 引擎啟動設定。 / Settings the engine is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub layout: StorageLayout,
    pub autosave_enabled: bool,
    pub autosave_interval: Duration,
}

impl EngineConfig {
    /// Default layout under `root` with a 30 second auto-save interval.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            layout: StorageLayout::under(root),
            autosave_enabled: true,
            autosave_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }

    /// 由偏好設定建立，路徑相對於 `root`。 / Builds the config from preferences, resolving paths under `root`.
    pub fn from_preferences(root: impl AsRef<Path>, preferences: &Preferences) -> Self {
        let root = root.as_ref();
        Self {
            layout: StorageLayout {
                autosave_path: root.join(&preferences.storage.autosave_file),
                library_dir: root.join(&preferences.storage.library_dir),
            },
            autosave_enabled: preferences.autosave.enabled,
            autosave_interval: preferences.autosave.interval(),
        }
    }

    /// 讀取 `root` 下的偏好設定檔。 / Reads `<root>/preferences.json` and builds the config.
    ///
    /// A missing file gives the defaults; an unreadable or malformed one is
    /// logged and the defaults are used too, so start-up never fails on it.
    pub fn load(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let preferences = match Preferences::load(root.join(PREFERENCES_FILE)) {
            Ok(preferences) => preferences,
            Err(err) => {
                log::warn!("using default preferences: {err}");
                Preferences::default()
            }
        };
        Self::from_preferences(root, &preferences)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_drive_layout_and_timer() {
        let mut preferences = Preferences::default();
        preferences.autosave.interval_secs = 45;
        preferences.storage.library_dir = "lists".into();
        let config = EngineConfig::from_preferences("/data", &preferences);
        assert_eq!(config.autosave_interval, Duration::from_secs(45));
        assert_eq!(config.layout.library_dir, Path::new("/data/lists"));
        assert_eq!(config.layout.autosave_path, Path::new("/data/autosave.json"));
        assert_eq!(EngineConfig::new("/data").layout, StorageLayout::under("/data"));
    }

    #[test]
    fn load_reads_preferences_under_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut preferences = Preferences::default();
        preferences.autosave.enabled = false;
        preferences.autosave.interval_secs = 12;
        preferences.save(dir.path().join(PREFERENCES_FILE)).unwrap();

        let config = EngineConfig::load(dir.path());
        assert!(!config.autosave_enabled);
        assert_eq!(config.autosave_interval, Duration::from_secs(12));
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EngineConfig::load(dir.path()), EngineConfig::new(dir.path()));

        std::fs::write(dir.path().join(PREFERENCES_FILE), "{ not json").unwrap();
        assert_eq!(EngineConfig::load(dir.path()), EngineConfig::new(dir.path()));
    }
}
