//! Artist + city interpretation

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{SearchContext, SearchStrategy};
use crate::db::PosterId;
use crate::terms::generate_artist_city_combinations;
use crate::Result;

/// Two or more word tokens with nothing else in between
static SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+(?:\s+\w+)+$").expect("valid shape pattern"));

/// "word(s) word(s)" queries split into artist/city candidate pairs:
/// known multi-word cities first, then the naive last-token and
/// first-token splits.
pub struct ArtistCity;

#[async_trait]
impl SearchStrategy for ArtistCity {
    fn name(&self) -> &'static str {
        "artist_city"
    }

    async fn attempt(&self, cx: &SearchContext<'_>) -> Result<Vec<PosterId>> {
        if !SHAPE_RE.is_match(cx.term) {
            return Ok(Vec::new());
        }

        for combo in generate_artist_city_combinations(cx.term, cx.config) {
            debug!(artist = %combo.artist, city = %combo.city, "trying artist+city combination");
            let ids = cx
                .store
                .posters_by_artist_city(&combo.artist, &combo.city, &cx.config.thresholds)
                .await?;
            if !ids.is_empty() {
                return Ok(ids);
            }
        }

        Ok(Vec::new())
    }
}
