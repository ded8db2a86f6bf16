/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use log::LevelFilter;
use seekthumbs::app_config::{Config, LogLevel};
use seekthumbs::thumbnail_index::IndexOptions;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.sprite_base_url, None);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert!(config.validate().is_ok());
    assert_eq!(config.index_options(), IndexOptions::direct());
}

#[test]
fn test_config_validation_withVariousBaseUrls_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.sprite_base_url = Some("https://cdn.example.com/sprite.jpg".to_string());
    assert!(config.validate().is_ok());

    // Empty means direct mode
    config.sprite_base_url = Some(String::new());
    assert!(config.validate().is_ok());

    config.sprite_base_url = Some("sprite.jpg".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_config_indexOptions_withBaseUrl_shouldSelectSpriteMode() {
    let config = Config {
        sprite_base_url: Some("https://cdn.example.com/sprite.jpg".to_string()),
        ..Config::default()
    };

    assert_eq!(
        config.index_options(),
        IndexOptions::with_sprite_base_url("https://cdn.example.com/sprite.jpg")
    );
}

#[test]
fn test_config_fromFile_withValidJson_shouldLoad() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "seekthumbs.json",
        r#"{ "sprite_base_url": "https://cdn.example.com/sprite.jpg", "log_level": "debug" }"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.sprite_base_url.as_deref(), Some("https://cdn.example.com/sprite.jpg"));
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_config_fromFile_withEmptyObject_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "seekthumbs.json", "{}")?;

    assert_eq!(Config::from_file(&path)?, Config::default());
    Ok(())
}

#[test]
fn test_config_fromFile_withUnknownKey_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "seekthumbs.json",
        r#"{ "spriteBaseUrl": "https://cdn.example.com/sprite.jpg" }"#,
    )?;

    let error = Config::from_file(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("spriteBaseUrl"));
    Ok(())
}

#[test]
fn test_config_loadOrDefault_withMissingFile_shouldReturnDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("missing.json"))?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_indexOptions_deserialize_withUnknownKey_shouldFail() {
    let parsed: Result<IndexOptions, _> = serde_json::from_str(r#"{ "sprite_base_url": null, "extra": 1 }"#);
    assert!(parsed.is_err());

    let parsed: IndexOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(parsed, IndexOptions::direct());
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
    assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
    assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::Info);
    assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::Debug);
    assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
}
