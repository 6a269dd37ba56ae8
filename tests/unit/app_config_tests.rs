/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use romanize::app_config::{Config, LogLevel, StrategyKind};
use crate::common::{create_temp_dir, create_test_file};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.chain, StrategyKind::ALL.to_vec());
    assert_eq!(config.max_chunk_chars, 450);
    assert!(config.detection.enabled);
    assert_eq!(config.detection.timeout_secs, 5);
    assert_eq!(config.aksharamukha.timeout_secs, 7);
    assert_eq!(config.azure.timeout_secs, 7);
    assert_eq!(config.llm.timeout_secs, 10);
    assert_eq!(config.translate.timeout_secs, 7);
    assert_eq!(config.translate.target_language, "en");
    assert!(config.llm.api_key.is_empty());
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("romanize.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.chain, StrategyKind::ALL.to_vec());

    // the written file loads back to the same settings
    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.chain, config.chain);
    assert_eq!(reloaded.llm.model, config.llm.model);
    Ok(())
}

#[test]
fn test_load_or_create_withPartialFile_shouldKeepGivenValues() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(
        dir.path(),
        "romanize.json",
        r#"{"chain":["llm","local"],"max_chunk_chars":200,"log_level":"debug","azure":{"region":"westeurope"}}"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.chain, vec![StrategyKind::Llm, StrategyKind::Local]);
    assert_eq!(config.max_chunk_chars, 200);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.azure.region, "westeurope");
    assert_eq!(config.azure.timeout_secs, 7);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_load_or_create_withBrokenJson_shouldFail() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "romanize.json", "{ not json")?;

    let error = Config::load_or_create(&path).expect_err("broken config must not load");
    assert!(error.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_load_or_create_withUnknownStrategy_shouldFail() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "romanize.json", r#"{"chain":["local","magic"]}"#)?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_restrict_chain_withSubset_shouldKeepConfiguredOrder() {
    let mut config = Config::default();
    config.restrict_chain(&[StrategyKind::Translate, StrategyKind::Local]);
    assert_eq!(config.chain, vec![StrategyKind::Local, StrategyKind::Translate]);

    let mut config = Config::default();
    config.restrict_chain(&[]);
    assert_eq!(config.chain.len(), 5);
}

#[test]
fn test_strategy_kind_fromStr_shouldAcceptAliases() {
    assert_eq!("anthropic".parse::<StrategyKind>().ok(), Some(StrategyKind::Llm));
    assert_eq!(" LibreTranslate ".parse::<StrategyKind>().ok(), Some(StrategyKind::Translate));
    assert!("google".parse::<StrategyKind>().is_err());
}

#[test]
fn test_validate_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.llm.timeout_secs = 0;
    assert!(config.validate().is_err());
}
