//! Configuration file loading tests.

use std::fs;

use descriptify::Config;
use tempfile::TempDir;

#[test]
fn loads_values_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(
        &config_path,
        serde_json::to_string_pretty(&serde_json::json!({
            "stripe_api_base": "http://localhost:12111",
            "model": "gpt-4o-mini",
            "max_tokens": 150
        }))
        .unwrap(),
    )
    .unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();
    assert_eq!(config.stripe_api_base, "http://localhost:12111");
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.max_tokens, 150);
    assert_eq!(config.generation_api_base, "https://api.openai.com/v1");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load(Some(temp_dir.path().join("absent.json").as_path())).unwrap();
    assert_eq!(config.model, Config::default().model);
}

#[test]
fn invalid_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, "{ not json").unwrap();

    let err = Config::load(Some(config_path.as_path())).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));
}

#[test]
fn api_key_in_file_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, r#"{"stripe_api_key": "sk_from_file"}"#).unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();
    assert_ne!(config.stripe_api_key, "sk_from_file");
}
