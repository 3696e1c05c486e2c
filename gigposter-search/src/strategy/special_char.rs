//! Special-character artist-name interpretation

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{SearchContext, SearchStrategy};
use crate::classify::has_special_characters;
use crate::db::PosterId;
use crate::Result;

/// One or more consecutive non-word characters
static NON_WORD_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+").expect("valid non-word pattern"));

/// Names like "AC/DC": punctuation, no whitespace. Matched three ways with
/// descending priority - exact name, wildcard pattern over artist name and
/// poster text, similarity on the space-normalized variant.
pub struct SpecialCharacter;

#[async_trait]
impl SearchStrategy for SpecialCharacter {
    fn name(&self) -> &'static str {
        "special_character"
    }

    async fn attempt(&self, cx: &SearchContext<'_>) -> Result<Vec<PosterId>> {
        if !has_special_characters(cx.term) {
            return Ok(Vec::new());
        }

        let like_pattern = wildcard_pattern(cx.term);
        let normalized = space_normalized(cx.term);
        // Punctuation-only terms normalize to nothing and carry no signal
        if normalized.is_empty() {
            return Ok(Vec::new());
        }
        debug!(pattern = %like_pattern, normalized = %normalized, "running special-character search");

        cx.store
            .posters_by_pattern(
                cx.term,
                &like_pattern,
                &normalized,
                cx.config.thresholds.special,
                cx.config.caps.special_character,
            )
            .await
    }
}

/// Substitute `%` for runs of non-word characters and wrap the result,
/// producing an ILIKE pattern ("AC/DC" -> "%AC%DC%").
fn wildcard_pattern(term: &str) -> String {
    let core = NON_WORD_RUN_RE.replace_all(term, "%");
    format!("%{}%", core.trim_matches('%'))
}

/// Substitute spaces for runs of non-word characters ("AC/DC" -> "AC DC").
fn space_normalized(term: &str) -> String {
    NON_WORD_RUN_RE.replace_all(term, " ").trim().to_string()
}
