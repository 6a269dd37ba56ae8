/*!
 * Validation of provider output.
 *
 * - `romanization`: decides whether a candidate is more Latin than its input
 * - `artifacts`: strips wrappers that completion models add around answers
 */

pub mod artifacts;
pub mod romanization;

// Re-export main types
pub use artifacts::strip_wrappers;
pub use romanization::{Rejection, check_romanization, is_valid_romanization, latin_ratio, non_ascii_count};
