//! Tests for configuration loading.

use std::io::Write;
use std::path::PathBuf;

use imposter::{AppConfig, STORAGE_KEY};
use imposter_game::CategoryKey;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.state_file(), &PathBuf::from("imposter_state.json"));
    assert_eq!(config.storage_key(), STORAGE_KEY);
    assert_eq!(config.word_list(), &None);
    assert_eq!(config.log_file(), &PathBuf::from("imposter.log"));
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = AppConfig::from_toml("state_file = \"/tmp/party.json\"").expect("Parse failed");
    assert_eq!(config.state_file(), &PathBuf::from("/tmp/party.json"));
    assert_eq!(config.storage_key(), STORAGE_KEY);
}

#[test]
fn test_empty_toml_is_default() {
    let config = AppConfig::from_toml("").expect("Parse failed");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_malformed_toml_fails() {
    let result = AppConfig::from_toml("state_file = [");
    let err = result.expect_err("Malformed config should fail");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = AppConfig::load_or_default(dir.path().join("absent.toml")).expect("Load failed");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "storage_key = \"party_v2\"").expect("Write failed");
    writeln!(file, "log_file = \"party.log\"").expect("Write failed");

    let config = AppConfig::load_or_default(file.path()).expect("Load failed");
    assert_eq!(config.storage_key(), "party_v2");
    assert_eq!(config.log_file(), &PathBuf::from("party.log"));
}

#[test]
fn test_overrides_replace_only_given_values() {
    let config = AppConfig::from_toml("word_list = \"words.json\"")
        .expect("Parse failed")
        .with_overrides(Some(PathBuf::from("other.json")), None);
    assert_eq!(config.state_file(), &PathBuf::from("other.json"));
    assert_eq!(config.word_list(), &Some(PathBuf::from("words.json")));
}

#[test]
fn test_bundled_word_bank_is_playable() {
    let words = AppConfig::default().word_bank().expect("Bundled lists load");
    for key in CategoryKey::all() {
        assert!(
            words.count(key) >= imposter_game::MIN_WORDS_PER_CATEGORY,
            "{} should be playable",
            key.label()
        );
    }
}

#[test]
fn test_word_bank_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{{\"food\": [\"Tea\", \"Rice\"]}}").expect("Write failed");

    let config = AppConfig::default().with_overrides(None, Some(file.path().to_path_buf()));
    let words = config.word_bank().expect("Word list loads");
    assert_eq!(words.count(CategoryKey::Food), 2);
    assert_eq!(words.count(CategoryKey::Places), 0);
}

#[test]
fn test_missing_word_list_file_fails() {
    let config =
        AppConfig::default().with_overrides(None, Some(PathBuf::from("/no/such/words.json")));
    assert!(config.word_bank().is_err());
}
