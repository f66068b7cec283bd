//! Settings tests - on-disk format and fallbacks

use std::fs;
use std::path::PathBuf;

use tetrix::settings::{GameSettings, SettingsStore, SETTINGS_PATH_ENV};

fn temp_settings_path(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join(format!("tetrix_it_{name}_{nanos}"))
        .join("nested")
        .join("tetrix.json")
}

#[test]
fn saved_file_is_pretty_camel_case_json() {
    let path = temp_settings_path("format");
    let store = SettingsStore::new(&path);
    let settings = GameSettings {
        high_score: 31337,
        music_enabled: false,
        is_fullscreen: true,
    };
    store.save(&settings).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains('\n'), "expected pretty-printed JSON");
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["highScore"], 31337);
    assert_eq!(value["musicEnabled"], false);
    assert_eq!(value["isFullscreen"], true);

    let _ = fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
}

#[test]
fn hand_written_file_with_extra_and_missing_keys_loads() {
    let path = temp_settings_path("lenient");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{ "highScore": 900, "theme": "dark" }"#).unwrap();

    let loaded = SettingsStore::new(&path).load();
    assert_eq!(loaded.high_score, 900);
    assert!(loaded.music_enabled);
    assert!(!loaded.is_fullscreen);

    let _ = fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
}

#[test]
fn high_score_survives_a_round_trip_through_disk() {
    let path = temp_settings_path("high");
    let store = SettingsStore::new(&path);

    let mut settings = store.load();
    assert_eq!(settings, GameSettings::default());
    assert!(settings.record_score(4200));
    store.save(&settings).unwrap();

    let mut reloaded = store.load();
    assert_eq!(reloaded.high_score, 4200);
    assert!(!reloaded.record_score(4000));

    let _ = fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
}

#[test]
fn store_location_follows_environment_override() {
    let path = temp_settings_path("env");
    let previous = std::env::var_os(SETTINGS_PATH_ENV);

    std::env::set_var(SETTINGS_PATH_ENV, &path);
    let store = SettingsStore::from_env().unwrap();
    assert_eq!(store.path(), path.as_path());

    // An empty override falls through to the home directory default
    std::env::set_var(SETTINGS_PATH_ENV, "");
    if std::env::var_os("HOME").is_some_and(|h| !h.is_empty()) {
        let store = SettingsStore::from_env().unwrap();
        assert_eq!(store.path(), SettingsStore::default_path().unwrap().as_path());
        assert!(store.path().ends_with(".config/tetrix.json"));
    }

    match previous {
        Some(value) => std::env::set_var(SETTINGS_PATH_ENV, value),
        None => std::env::remove_var(SETTINGS_PATH_ENV),
    }
}
