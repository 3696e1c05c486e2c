//! Multi-artist "OR" interpretation

use std::collections::HashSet;

use async_trait::async_trait;
use futures::future::try_join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{SearchContext, SearchStrategy};
use crate::db::PosterId;
use crate::Result;

/// Whitespace-delimited "or", case-insensitive
static OR_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+or\s+").expect("valid or-split pattern"));

/// "Phish OR Widespread Panic" queries: independent single-artist searches
/// per name, issued concurrently, unioned and deduplicated.
///
/// The split is purely lexical; an artist name that itself contains the
/// word "or" will misfire here, miss on both halves, and be picked up by
/// the generic fallback instead.
pub struct MultiArtistOr;

#[async_trait]
impl SearchStrategy for MultiArtistOr {
    fn name(&self) -> &'static str {
        "multi_artist_or"
    }

    async fn attempt(&self, cx: &SearchContext<'_>) -> Result<Vec<PosterId>> {
        if !OR_SPLIT_RE.is_match(cx.term) {
            return Ok(Vec::new());
        }

        let names: Vec<&str> = OR_SPLIT_RE
            .split(cx.term)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if names.len() < 2 {
            return Ok(Vec::new());
        }

        debug!(artists = names.len(), "running multi-artist OR search");
        let threshold = cx.config.thresholds.artist;
        let searches = names
            .iter()
            .map(|name| cx.store.posters_by_artist(name, threshold));
        let result_sets = try_join_all(searches).await?;

        // Union in first-seen order
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for ids in result_sets {
            for id in ids {
                if seen.insert(id) {
                    merged.push(id);
                }
            }
        }

        Ok(merged)
    }
}
