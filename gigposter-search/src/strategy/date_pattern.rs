//! Date-pattern interpretation

use async_trait::async_trait;
use tracing::debug;

use super::{SearchContext, SearchStrategy};
use crate::dates::extract_date_info;
use crate::db::PosterId;
use crate::Result;

/// Queries carrying a slash date or year ("phish 6/30/2024"): the residual
/// text with the date removed is treated as the artist, matched strictly
/// against the extracted year.
pub struct DatePattern;

#[async_trait]
impl SearchStrategy for DatePattern {
    fn name(&self) -> &'static str {
        "date_pattern"
    }

    async fn attempt(&self, cx: &SearchContext<'_>) -> Result<Vec<PosterId>> {
        let info = extract_date_info(cx.term);
        let Some(year) = info.year else {
            return Ok(Vec::new());
        };
        if info.search_without_date.is_empty() {
            return Ok(Vec::new());
        }

        debug!(artist = %info.search_without_date, year, "trying date-pattern artist+year");
        cx.store
            .posters_by_artist_year(&info.search_without_date, year, &cx.config.thresholds)
            .await
    }
}
