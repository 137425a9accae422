// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use studio_camera::{AspectRatio, CaptureMode, Config, FilterPreset, LensFacing};

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.mirror, "Mirror should be enabled by default");
    assert!(config.flash, "Flash should be enabled by default");
    assert!(!config.hd);
    assert!(!config.watermark);
    assert_eq!(config.timer_seconds, 3);
    assert_eq!(config.capture_mode, CaptureMode::Single);
    assert_eq!(config.lens, LensFacing::Front);
    assert_eq!(config.aspect_ratio, AspectRatio::SixteenNine);
    assert_eq!(config.filter, FilterPreset::Normal);
}

#[test]
fn test_default_config_gives_default_settings() {
    let settings = Config::default().capture_settings();
    assert_eq!(settings, studio_camera::CaptureSettings::default());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "capture_mode": "burst", "aspect_ratio": "1:1", "filter": "noir", "hd": true }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.capture_mode, CaptureMode::Burst);
    assert_eq!(config.aspect_ratio, AspectRatio::Square);
    assert_eq!(config.filter, FilterPreset::Noir);
    assert!(config.hd);
    // Untouched keys
    assert_eq!(config.timer_seconds, 3);
    assert!(config.mirror);

    let settings = config.capture_settings();
    assert_eq!(settings.filter, FilterPreset::Noir.descriptor());
    assert!(settings.hd_enabled);
    assert_eq!(settings.mode.shot_count(), 3);
}

#[test]
fn test_explicit_path_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(Config::load_or_default(Some(&missing)).is_err());

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    assert!(Config::load(&broken).is_err());
}

#[test]
fn test_default_path_location() {
    if let Some(path) = Config::default_path() {
        assert!(path.ends_with("studio-camera/config.json"));
    }
}
