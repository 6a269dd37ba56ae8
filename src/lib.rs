/*!
 * # romanize - script-aware lyric transliteration
 *
 * A Rust library that rewrites song lyrics written in non-Latin scripts
 * into Latin letters, so they can be sung by someone who cannot read the
 * original script.
 *
 * ## Features
 *
 * - Unicode-range script classification
 * - Language detection with a script-based fallback
 * - Line-preserving chunking for bounded provider calls
 * - Ordered failover across romanization providers:
 *   - Local rule-based converters (no network)
 *   - Aksharamukha script converter
 *   - Translator transliterate endpoint
 *   - Anthropic API (generative romanization)
 *   - LibreTranslate (last-resort translation)
 * - Validation of every provider output before it is accepted
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `script`: Script classification and script/language tables
 * - `validation`: Romanization checks and output cleanup
 * - `transliteration`: The engine:
 *   - `transliteration::detector`: Language detection
 *   - `transliteration::chunker`: Text segmentation
 *   - `transliteration::local` and `transliteration::networked`: Strategies
 *   - `transliteration::orchestrator`: Failover driver
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for the networked services
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod script;
pub mod transliteration;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::{Config, StrategyKind};
pub use errors::{AppError, AttemptError, ProviderError, TransliterationError};
pub use language_utils::{LanguageCode, get_language_name, normalize_to_part2t};
pub use script::{ScriptTag, classify};
pub use transliteration::{RomanizationStrategy, TransliterationResult, Transliterator, chunk_text};
pub use validation::is_valid_romanization;
