//! Integration tests for configuration loading and paths

use std::fs;

use term_filter::config::{ConfigError, EditorConfig};
use term_filter::config_paths;
use term_filter::keymap::{load_keymap_file, Command, KeymapError};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_paths_are_consistent() {
    if let Some(config_dir) = config_paths::config_dir() {
        assert!(config_dir.ends_with("term-filter"));

        if let Some(config_file) = config_paths::config_file() {
            assert!(config_file.starts_with(&config_dir));
            assert!(config_file.ends_with("config.yaml"));
        }

        if let Some(keymap_file) = config_paths::keymap_file() {
            assert!(keymap_file.starts_with(&config_dir));
            assert!(keymap_file.ends_with("keymap.yaml"));
        }

        if let Some(logs_dir) = config_paths::logs_dir() {
            assert!(logs_dir.starts_with(&config_dir));
        }
    }
}

// ========================================================================
// Editor Config Tests
// ========================================================================

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = EditorConfig {
        separator: ",".into(),
        placeholder: Some("Filter hosts".into()),
        manage_required: true,
        ..EditorConfig::default()
    };
    config.save_to(&path).unwrap();

    let loaded = EditorConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = EditorConfig::load_from(&dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_load_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "separator: [unclosed").unwrap();

    let result = EditorConfig::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "theme: dark\nterm_completion: false\n").unwrap();

    let config = EditorConfig::load_from(&path).unwrap();
    assert!(!config.term_completion);
    assert_eq!(config.separator, " ");
}

// ========================================================================
// Keymap Files
// ========================================================================

#[test]
fn test_keymap_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(
        &path,
        "bindings:\n  - key: \"ctrl+enter\"\n    command: Submit\n",
    )
    .unwrap();

    let bindings = load_keymap_file(&path).unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].command, Command::Submit);
}

#[test]
fn test_keymap_file_with_bad_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(&path, "bindings:\n  - key: \"x\"\n    command: Explode\n").unwrap();

    assert!(matches!(
        load_keymap_file(&path),
        Err(KeymapError::InvalidCommand(_))
    ));
}
