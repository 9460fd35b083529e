//! Tests for settings persistence

use std::time::Duration;

use rigtemp::settings::AnalyzerSettings;

fn temp_settings_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("rigtemp-settings-{}-{}", name, std::process::id()))
        .join("settings.json")
}

#[test]
fn test_defaults() {
    let settings = AnalyzerSettings::default();
    assert_eq!(settings.version, 1);
    assert_eq!(settings.polling_interval(), Duration::from_secs(5));
    assert_eq!(settings.resize_debounce(), Duration::from_millis(100));
    assert_eq!(settings.y_axis_margin, 5.0);
    assert!(settings.file_series_config().is_default_visible("CPU_BIG"));
    assert!(!settings.file_series_config().is_default_visible("Min"));
    assert!(settings.live_series_config().is_default_visible("Min"));
}

#[test]
fn test_save_and_load_roundtrip() {
    let path = temp_settings_path("roundtrip");
    let mut settings = AnalyzerSettings::default();
    settings.api_base_url = "http://rig-monitor:9000".to_string();
    settings.polling_interval_ms = 1500;
    settings.default_visible_markers.insert("GPU".to_string());

    settings.save_to(&path).unwrap();
    let loaded = AnalyzerSettings::load_from(&path);
    assert_eq!(loaded, settings);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_missing_fields_use_defaults() {
    let path = temp_settings_path("partial");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"polling_interval_ms": 250}"#).unwrap();

    let loaded = AnalyzerSettings::load_from(&path);
    assert_eq!(loaded.polling_interval_ms, 250);
    assert_eq!(loaded.api_base_url, AnalyzerSettings::default().api_base_url);
    assert_eq!(
        loaded.default_visible_markers,
        AnalyzerSettings::default().default_visible_markers
    );

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_missing_or_corrupt_file_gives_defaults() {
    let path = temp_settings_path("corrupt");
    assert_eq!(AnalyzerSettings::load_from(&path), AnalyzerSettings::default());

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json at all").unwrap();
    assert_eq!(AnalyzerSettings::load_from(&path), AnalyzerSettings::default());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
