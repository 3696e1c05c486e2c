//! Artist + city + year interpretation

use async_trait::async_trait;
use tracing::debug;

use super::{SearchContext, SearchStrategy};
use crate::dates::split_year;
use crate::db::PosterId;
use crate::terms::generate_artist_city_combinations;
use crate::Result;

/// Strictest interpretation: a year plus at least two remaining tokens,
/// split into artist and city candidates and matched with AND semantics.
pub struct ArtistCityYear;

#[async_trait]
impl SearchStrategy for ArtistCityYear {
    fn name(&self) -> &'static str {
        "artist_city_year"
    }

    async fn attempt(&self, cx: &SearchContext<'_>) -> Result<Vec<PosterId>> {
        let Some((year, residual)) = split_year(cx.term) else {
            return Ok(Vec::new());
        };
        if residual.split_whitespace().count() < 2 {
            return Ok(Vec::new());
        }

        for combo in generate_artist_city_combinations(&residual, cx.config) {
            debug!(
                artist = %combo.artist,
                city = %combo.city,
                year,
                "trying artist+city+year combination"
            );
            let ids = cx
                .store
                .posters_by_artist_city_year(&combo.artist, &combo.city, year, &cx.config.thresholds)
                .await?;
            if !ids.is_empty() {
                return Ok(ids);
            }
        }

        Ok(Vec::new())
    }
}
