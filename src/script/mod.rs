/*!
 * Script detection and script/language lookup tables.
 *
 * - `classifier`: Unicode-range classification into `ScriptTag`
 * - `mapping`: language heuristics and provider script identifiers
 */

pub mod classifier;
pub mod mapping;

pub use classifier::{SCAN_LIMIT, ScriptTag, classify, scripts_present};
pub use mapping::{ProviderScriptName, guess_language, resolve_language, script_names_for};
