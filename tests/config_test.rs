//! Integration tests for Settings layered loading.
//!
//! Global and local files are both temp files here, so the user's real
//! config never takes part.

use std::fs;

use tempfile::TempDir;

use dispatch_demo::application::ApplicationError;
use dispatch_demo::config::{local_config_path, Settings};

#[test]
fn given_global_config_when_loading_then_overrides_defaults() {
    // Arrange
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("dispatch-demo.toml");
    fs::write(&global_path, "explain = true\n").unwrap();

    // Act
    let settings = Settings::load_layers(Some(&global_path), None).expect("load settings");

    // Assert
    assert!(settings.explain);
    assert!(!settings.check);
}

#[test]
fn given_global_and_local_config_when_loading_then_local_wins() {
    // Arrange
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("dispatch-demo.toml");
    fs::write(&global_path, "explain = true\ncheck = true\n").unwrap();

    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "check = false\n").unwrap();

    // Act
    let settings =
        Settings::load_layers(Some(&global_path), Some(project.path())).expect("load settings");

    // Assert: explain inherited from global, check overridden locally
    assert!(settings.explain);
    assert!(!settings.check);
}

#[test]
fn given_missing_files_when_loading_then_uses_defaults() {
    let global_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    let settings = Settings::load_layers(
        Some(&global_dir.path().join("absent.toml")),
        Some(project.path()),
    )
    .expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_malformed_local_config_when_loading_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "explain = [").unwrap();

    let err = Settings::load_layers(None, Some(project.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".dispatch-demo.toml"));
}

#[test]
fn given_settings_when_serializing_then_round_trips_through_toml() {
    let settings = Settings {
        explain: true,
        check: false,
    };

    let text = settings.to_toml().unwrap();

    assert_eq!(text, "explain = true\ncheck = false\n");
}
