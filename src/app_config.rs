use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::providers::{aksharamukha, anthropic, azure, libretranslate};

/// Application configuration module
/// This module handles the engine configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Strategies in priority order
    #[serde(default = "default_chain")]
    pub chain: Vec<StrategyKind>,

    /// Soft cap on chunk length, in chars
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Language detection service
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Aksharamukha script converter
    #[serde(default)]
    pub aksharamukha: AksharamukhaConfig,

    /// Translator transliterate endpoint
    #[serde(default)]
    pub azure: AzureConfig,

    /// Generative romanization
    #[serde(default)]
    pub llm: LlmConfig,

    /// Last-resort machine translation
    #[serde(default)]
    pub translate: TranslateConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Romanization strategy identifier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    // @strategy: Rule-based local converters
    Local,
    // @strategy: Aksharamukha script converter
    Aksharamukha,
    // @strategy: Translator transliterate endpoint
    Azure,
    // @strategy: Generative completion
    Llm,
    // @strategy: Machine translation fallback
    Translate,
}

impl StrategyKind {
    /// Every strategy, in default priority order
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Local,
        StrategyKind::Aksharamukha,
        StrategyKind::Azure,
        StrategyKind::Llm,
        StrategyKind::Translate,
    ];

    // @returns: Identifier reported in results
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Aksharamukha => "aksharamukha",
            Self::Azure => "azure",
            Self::Llm => "llm",
            Self::Translate => "translate",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "aksharamukha" => Ok(Self::Aksharamukha),
            "azure" => Ok(Self::Azure),
            "llm" | "anthropic" => Ok(Self::Llm),
            "translate" | "libretranslate" => Ok(Self::Translate),
            _ => Err(anyhow!("Invalid strategy: {}", s)),
        }
    }
}

/// Language detection service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DetectionConfig {
    /// Whether to call the detection service at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// LibreTranslate-compatible endpoint
    #[serde(default = "default_libretranslate_endpoint")]
    pub endpoint: String,

    /// API key, if the instance requires one
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_detection_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_libretranslate_endpoint(),
            api_key: String::new(),
            timeout_secs: default_detection_timeout_secs(),
        }
    }
}

/// Aksharamukha service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AksharamukhaConfig {
    /// Service endpoint URL
    #[serde(default = "default_aksharamukha_endpoint")]
    pub endpoint: String,

    /// Latin scheme to convert into (ISO, IAST, HK, ...)
    #[serde(default = "default_target_scheme")]
    pub target_scheme: String,

    /// Request timeout in seconds
    #[serde(default = "default_service_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AksharamukhaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_aksharamukha_endpoint(),
            target_scheme: default_target_scheme(),
            timeout_secs: default_service_timeout_secs(),
        }
    }
}

/// Translator transliterate configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AzureConfig {
    /// Service endpoint URL
    #[serde(default = "default_azure_endpoint")]
    pub endpoint: String,

    /// Subscription key; the strategy is disabled without one
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Resource region, empty for global resources
    #[serde(default = "String::new")]
    pub region: String,

    /// Request timeout in seconds
    #[serde(default = "default_service_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            endpoint: default_azure_endpoint(),
            api_key: String::new(),
            region: String::new(),
            timeout_secs: default_service_timeout_secs(),
        }
    }
}

/// Generative romanization configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    /// Model name (e.g., "claude-3-haiku-20240307")
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API key for the service; the strategy is disabled without one
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (optional, for proxies)
    #[serde(default = "default_anthropic_endpoint")]
    pub endpoint: String,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// System prompt template
    /// Placeholders: {language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            api_key: String::new(),
            endpoint: default_anthropic_endpoint(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// System prompt with the language placeholder filled in
    pub fn render_system_prompt(&self, language_name: &str) -> String {
        self.system_prompt.replace("{language}", language_name)
    }
}

/// Machine translation fallback configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslateConfig {
    /// LibreTranslate-compatible endpoint
    #[serde(default = "default_libretranslate_endpoint")]
    pub endpoint: String,

    /// API key, if the instance requires one
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Latin-script target language
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Request timeout in seconds
    #[serde(default = "default_service_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: default_libretranslate_endpoint(),
            api_key: String::new(),
            target_language: default_target_language(),
            timeout_secs: default_service_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_chain() -> Vec<StrategyKind> {
    StrategyKind::ALL.to_vec()
}

fn default_max_chunk_chars() -> usize {
    450
}

fn default_detection_timeout_secs() -> u64 {
    5
}

fn default_service_timeout_secs() -> u64 {
    7
}

fn default_llm_timeout_secs() -> u64 {
    10
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.0
}

fn default_true() -> bool {
    true
}

fn default_target_scheme() -> String {
    "ISO".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_libretranslate_endpoint() -> String {
    libretranslate::DEFAULT_ENDPOINT.to_string()
}

fn default_aksharamukha_endpoint() -> String {
    aksharamukha::DEFAULT_ENDPOINT.to_string()
}

fn default_azure_endpoint() -> String {
    azure::DEFAULT_ENDPOINT.to_string()
}

fn default_anthropic_endpoint() -> String {
    anthropic::DEFAULT_ENDPOINT.to_string()
}

fn default_llm_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_system_prompt() -> String {
    "You are a transliteration engine for song lyrics. Rewrite the {language} lyrics the user sends in Latin script (romanization) so they can be sung by someone who cannot read the original script. Do not translate. Keep every line break and the order of lines exactly as given. Keep words that are already in Latin script unchanged. Reply with the romanized lyrics only.".to_string()
}

/// Convert a timeout in seconds to a Duration
pub fn secs(timeout_secs: u64) -> Duration {
    Duration::from_secs(timeout_secs)
}

impl Config {
    /// Load the configuration from a JSON file, writing defaults when it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Fill credentials from the environment when the file leaves them empty
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Same as `apply_env_overrides` with an injectable lookup
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fill = |slot: &mut String, name: &str| {
            if slot.is_empty() {
                if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                    *slot = value.trim().to_string();
                }
            }
        };

        fill(&mut self.llm.api_key, "ANTHROPIC_API_KEY");
        fill(&mut self.azure.api_key, "AZURE_TRANSLATOR_KEY");
        fill(&mut self.azure.region, "AZURE_TRANSLATOR_REGION");
        fill(&mut self.translate.api_key, "LIBRETRANSLATE_API_KEY");
        fill(&mut self.detection.api_key, "LIBRETRANSLATE_API_KEY");
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.chain.is_empty() {
            return Err(anyhow!("At least one strategy must be configured"));
        }

        for (index, kind) in self.chain.iter().enumerate() {
            if self.chain[..index].contains(kind) {
                return Err(anyhow!("Strategy '{}' appears more than once in the chain", kind));
            }
        }

        if let Some(position) = self.chain.iter().position(|kind| *kind == StrategyKind::Translate) {
            if position + 1 != self.chain.len() {
                return Err(anyhow!("Strategy 'translate' is a last resort and must come last in the chain"));
            }
        }

        if self.max_chunk_chars == 0 {
            return Err(anyhow!("max_chunk_chars must be greater than zero"));
        }

        let _target_name = crate::language_utils::get_language_name(&self.translate.target_language)
            .with_context(|| format!("Invalid translation target language: {}", self.translate.target_language))?;

        let services = [
            ("detection", &self.detection.endpoint, self.detection.timeout_secs),
            ("aksharamukha", &self.aksharamukha.endpoint, self.aksharamukha.timeout_secs),
            ("azure", &self.azure.endpoint, self.azure.timeout_secs),
            ("llm", &self.llm.endpoint, self.llm.timeout_secs),
            ("translate", &self.translate.endpoint, self.translate.timeout_secs),
        ];
        for (name, endpoint, timeout_secs) in services {
            if timeout_secs == 0 {
                return Err(anyhow!("Timeout for {} must be greater than zero", name));
            }
            Url::parse(endpoint)
                .with_context(|| format!("Invalid endpoint for {}: {}", name, endpoint))?;
        }

        Ok(())
    }

    /// Keep only the given strategies, preserving configured priority
    pub fn restrict_chain(&mut self, only: &[StrategyKind]) {
        if only.is_empty() {
            return;
        }
        self.chain.retain(|kind| only.contains(kind));
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            chain: default_chain(),
            max_chunk_chars: default_max_chunk_chars(),
            detection: DetectionConfig::default(),
            aksharamukha: AksharamukhaConfig::default(),
            azure: AzureConfig::default(),
            llm: LlmConfig::default(),
            translate: TranslateConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
