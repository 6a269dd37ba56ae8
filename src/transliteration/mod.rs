/*!
 * The romanization engine.
 *
 * - `chunker`: line-preserving segmentation under a char budget
 * - `deadline`: per-call deadlines for networked attempts
 * - `detector`: networked language detection with a script fallback
 * - `strategy`: the `RomanizationStrategy` interface
 * - `local`: offline converters
 * - `networked`: strategies wrapping the provider clients
 * - `orchestrator`: `Transliterator`, the failover driver
 * - `result`: `TransliterationResult`
 */

pub mod chunker;
pub mod deadline;
pub mod detector;
pub mod local;
pub mod networked;
pub mod orchestrator;
pub mod result;
pub mod strategy;

pub use chunker::{DEFAULT_MAX_CHUNK_CHARS, chunk_text, split_edges};
pub use deadline::Deadline;
pub use detector::LanguageDetector;
pub use local::LocalStrategy;
pub use networked::{AksharamukhaStrategy, AzureStrategy, LlmStrategy, TranslateStrategy};
pub use orchestrator::{StrategyStatus, Transliterator};
pub use result::{NO_PROVIDER, TransliterationResult};
pub use strategy::{LanguageContext, RomanizationStrategy};
