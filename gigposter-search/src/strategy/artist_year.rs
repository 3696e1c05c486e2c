//! Artist + year interpretation

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{SearchContext, SearchStrategy};
use crate::db::PosterId;
use crate::Result;

/// Letters/whitespace followed by a trailing 4-digit year
static ARTIST_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z\s]+)\s+((?:19|20)\d{2})$").expect("valid artist-year pattern")
});

/// "pearl jam 1994" style queries: artist similarity AND event year.
pub struct ArtistYear;

#[async_trait]
impl SearchStrategy for ArtistYear {
    fn name(&self) -> &'static str {
        "artist_year"
    }

    async fn attempt(&self, cx: &SearchContext<'_>) -> Result<Vec<PosterId>> {
        let Some(caps) = ARTIST_YEAR_RE.captures(cx.term) else {
            return Ok(Vec::new());
        };

        let artist = caps[1].trim().to_string();
        if artist.chars().count() < 2 {
            return Ok(Vec::new());
        }
        let Ok(year) = caps[2].parse::<i32>() else {
            return Ok(Vec::new());
        };

        debug!(artist = %artist, year, "trying artist+year");
        cx.store
            .posters_by_artist_year(&artist, year, &cx.config.thresholds)
            .await
    }
}
