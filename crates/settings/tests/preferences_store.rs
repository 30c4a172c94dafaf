use std::fs;
use std::time::Duration;

use tempfile::tempdir;
use tierlist_settings::{Preferences, PreferencesError, PREFERENCES_FILE};

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let prefs = Preferences::load(dir.path().join(PREFERENCES_FILE)).expect("defaults");
    assert!(prefs.autosave.enabled);
    assert_eq!(prefs.autosave.interval(), Duration::from_secs(30));
    assert_eq!(prefs.storage.autosave_file, "autosave.json");
    assert_eq!(prefs.storage.library_dir, "saved");
    assert!(!dir.path().join(PREFERENCES_FILE).exists());
}

#[test]
fn saved_preferences_reload_into_nested_directories() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join(PREFERENCES_FILE);

    let mut prefs = Preferences::default();
    prefs.autosave.enabled = false;
    prefs.autosave.interval_secs = 90;
    prefs.storage.library_dir = "lists".to_string();
    prefs.save(&path).expect("save");

    assert_eq!(Preferences::load(&path).expect("reload"), prefs);
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn partial_and_out_of_range_documents_are_sanitized() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(PREFERENCES_FILE);
    fs::write(
        &path,
        r#"{
            "version": 0,
            "autosave": { "interval_secs": 1 },
            "storage": { "autosave_file": "  " }
        }"#,
    )
    .expect("write prefs");

    let prefs = Preferences::load(&path).expect("load file");
    assert_eq!(prefs.version, 1);
    assert!(prefs.autosave.enabled, "missing flag defaults to enabled");
    assert_eq!(prefs.autosave.interval_secs, 5);
    assert_eq!(prefs.storage.autosave_file, "autosave.json");
    assert_eq!(prefs.storage.library_dir, "saved");
}

#[test]
fn malformed_document_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(PREFERENCES_FILE);
    fs::write(&path, "[1, 2").expect("write prefs");
    assert!(matches!(
        Preferences::load(&path),
        Err(PreferencesError::Json { .. })
    ));
}

#[test]
fn interval_bounds() {
    let mut prefs = Preferences::default();
    prefs.autosave.interval_secs = 0;
    prefs.sanitize();
    assert_eq!(prefs.autosave.interval_secs, 30);

    prefs.autosave.interval_secs = 100_000;
    prefs.sanitize();
    assert_eq!(prefs.autosave.interval_secs, 3600);
}
