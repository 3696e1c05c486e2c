//! Raw query validation and stop-word filtering
//!
//! First stage of the pipeline: reject unusable input before any
//! interpretation or database work happens.

use std::collections::HashSet;

/// Minimum length of a usable search term after trimming
const MIN_TERM_LEN: usize = 2;

/// Validate and clean a raw search term.
///
/// Returns `None` when the input is empty, all-whitespace, or shorter than
/// 2 characters after trimming; otherwise the trimmed string.
///
/// # Examples
///
/// ```
/// use gigposter_search::sanitize::validate_and_clean;
///
/// assert_eq!(validate_and_clean(""), None);
/// assert_eq!(validate_and_clean("   "), None);
/// assert_eq!(validate_and_clean("a"), None);
/// assert_eq!(validate_and_clean("ab"), Some("ab".to_string()));
/// assert_eq!(validate_and_clean("  Pearl Jam  "), Some("Pearl Jam".to_string()));
/// ```
pub fn validate_and_clean(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_TERM_LEN {
        return None;
    }
    Some(trimmed.to_string())
}

/// Remove stop words and single-character tokens from a term.
///
/// Matching is case-insensitive. If filtering would erase the entire term,
/// the original term is returned unchanged - the pipeline never produces an
/// empty query from a non-empty one. Idempotent: re-running on the output
/// yields the same output.
pub fn filter_stop_words(term: &str, stop_words: &HashSet<String>) -> String {
    let kept: Vec<&str> = term
        .split_whitespace()
        .filter(|token| {
            token.chars().count() > 1 && !stop_words.contains(&token.to_lowercase())
        })
        .collect();

    if kept.is_empty() {
        return term.to_string();
    }
    kept.join(" ")
}
