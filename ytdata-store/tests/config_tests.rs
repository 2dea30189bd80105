//! Config persistence tests.

use tempfile::TempDir;
use ytdata_store::{Config, StoreError};

#[test]
fn test_missing_file_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("ytdata").join("config.json");

    let mut config = Config::default();
    config.api.api_key_env = "MY_KEY".to_string();
    config.collect.search_max_results = 25;
    config.transcripts.languages = vec!["de".to_string()];
    config.general.log_level = "info".to_string();

    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(StoreError::Serialization(_))
    ));
}

#[test]
fn test_invalid_value_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"general":{"log_level":"shout"}}"#).unwrap();

    assert!(matches!(Config::load_from(&path), Err(StoreError::Config(_))));
}
