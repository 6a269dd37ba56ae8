/*!
 * End-to-end scenarios against engines built from configuration
 */

use anyhow::Result;
use std::time::{Duration, Instant};

use romanize::app_config::Config;
use romanize::providers::libretranslate::LibreTranslate;
use romanize::transliteration::{LanguageDetector, LocalStrategy, NO_PROVIDER, Transliterator};
use romanize::validation::latin_ratio;
use crate::common::mock_strategies::{MockBehavior, MockStrategy};
use crate::common::{UNREACHABLE_ENDPOINT, stalled_endpoint};

/// Default chain with every service pointed at a dead endpoint and credentials set
fn offline_config() -> Config {
    let mut config = Config::default();
    config.detection.endpoint = UNREACHABLE_ENDPOINT.to_string();
    config.aksharamukha.endpoint = UNREACHABLE_ENDPOINT.to_string();
    config.azure.endpoint = UNREACHABLE_ENDPOINT.to_string();
    config.azure.api_key = "test-key".to_string();
    config.llm.endpoint = UNREACHABLE_ENDPOINT.to_string();
    config.llm.api_key = "test-key".to_string();
    config.translate.endpoint = UNREACHABLE_ENDPOINT.to_string();
    config
}

#[tokio::test]
async fn test_scenario_japanese_shouldRomanizeLocally() -> Result<()> {
    let config = offline_config();
    config.validate()?;
    let engine = Transliterator::from_config(&config);

    let result = engine.transliterate(Some("こんにちは")).await?;

    assert_ne!(result.provider, NO_PROVIDER);
    assert_eq!(result.lang.as_deref(), Some("ja"));
    assert!(result.result.chars().all(|c| c.is_ascii()), "got {}", result.result);
    assert_eq!(latin_ratio(&result.result), 1.0);
    Ok(())
}

#[tokio::test]
async fn test_scenario_emptyInput_shouldNotTouchTheNetwork() -> Result<()> {
    let (endpoint, server) = stalled_endpoint().await?;
    let detector = LanguageDetector::new(LibreTranslate::new("", endpoint), Duration::from_secs(30));
    let strategy = MockStrategy::new("mock", MockBehavior::Fixed("never".to_string()));
    let log = strategy.log();
    let engine = Transliterator::new(detector, vec![strategy.boxed()], 450);

    // a detection call would hang for 30s against the stalled endpoint
    let result = tokio::time::timeout(Duration::from_secs(2), engine.transliterate(Some(""))).await??;

    assert_eq!(result.result, "");
    assert_eq!(result.provider, NO_PROVIDER);
    assert!(result.lang.is_none());
    assert_eq!(log.count(), 0);
    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_scenario_latinInput_shouldReturnIdentity() -> Result<()> {
    let engine = Transliterator::from_config(&offline_config());

    let result = engine.transliterate(Some("Hello world")).await?;

    assert_eq!(result.result, "Hello world");
    assert_eq!(result.provider, NO_PROVIDER);
    Ok(())
}

#[tokio::test]
async fn test_scenario_detectionTimeoutWithCyrillic_shouldFallBackToScript() -> Result<()> {
    let (endpoint, server) = stalled_endpoint().await?;
    let detector = LanguageDetector::new(LibreTranslate::new("", endpoint), Duration::from_millis(300));
    let engine = Transliterator::new(detector, vec![Box::new(LocalStrategy::new())], 450);

    let started = Instant::now();
    let result = engine.transliterate(Some("Я тебя люблю")).await?;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(result.lang.as_deref(), Some("ru"));
    assert_eq!(result.provider, "local");
    assert_eq!(result.result, "Ya tebya lyublyu");
    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_scenario_detectionTimeoutFromConfig_shouldStillSucceedDownstream() -> Result<()> {
    let (endpoint, server) = stalled_endpoint().await?;
    let mut config = offline_config();
    config.detection.endpoint = endpoint;
    config.detection.timeout_secs = 1;
    let engine = Transliterator::from_config(&config);

    let result = engine.transliterate(Some("Доброе утро")).await?;

    assert_eq!(result.lang.as_deref(), Some("ru"));
    assert_ne!(result.provider, NO_PROVIDER);
    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_scenario_arabicWithEveryServiceDown_shouldReturnIdentity() -> Result<()> {
    let engine = Transliterator::from_config(&offline_config());
    let lyrics = "حبيبي يا نور العين";

    let result = engine.transliterate(Some(lyrics)).await?;

    assert_eq!(result.provider, NO_PROVIDER);
    assert_eq!(result.result, lyrics);
    assert_eq!(result.original, lyrics);
    assert!(result.lang.is_some());
    Ok(())
}

#[tokio::test]
async fn test_scenario_multiScriptLyrics_shouldKeepLineStructure() -> Result<()> {
    let mut config = offline_config();
    config.max_chunk_chars = 12;
    let engine = Transliterator::from_config(&config);
    let lyrics = "사랑해요\nI love you\nさくら\nЛюблю тебя";

    let result = engine.transliterate(Some(lyrics)).await?;

    assert_eq!(result.provider, "local");
    assert_eq!(result.result.lines().count(), lyrics.lines().count());
    assert_eq!(result.result, "saranghaeyo\nI love you\nsakura\nLyublyu tebya");
    Ok(())
}

#[tokio::test]
async fn test_scenario_japaneseWithKanji_shouldLeaveItToNetworkedStrategies() -> Result<()> {
    let networked = MockStrategy::new("networked", MockBehavior::Fixed("kimi no na wa".to_string()));
    let log = networked.log();
    let engine = Transliterator::new(
        LanguageDetector::heuristic_only(),
        vec![Box::new(LocalStrategy::new()), networked.boxed()],
        450,
    );

    let result = engine.transliterate(Some("君の名は")).await?;

    assert_eq!(result.lang.as_deref(), Some("ja"));
    assert_eq!(result.provider, "networked");
    assert_eq!(result.result, "kimi no na wa");
    assert_eq!(log.count(), 1);
    Ok(())
}

#[tokio::test]
#[ignore] // Requires network access to the public Aksharamukha API
async fn test_scenario_hindiAgainstRealAksharamukha_shouldRomanize() -> Result<()> {
    let mut config = Config::default();
    config.detection.enabled = false;
    config.chain = vec![romanize::StrategyKind::Aksharamukha];
    let engine = Transliterator::from_config(&config);

    let result = engine.transliterate(Some("नमस्ते दुनिया")).await?;

    assert_eq!(result.provider, "aksharamukha");
    assert_eq!(result.lang.as_deref(), Some("hi"));
    Ok(())
}
