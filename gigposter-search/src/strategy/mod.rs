//! Pattern handlers tried in fixed priority order
//!
//! Each strategy is one self-contained interpretation of the query shape
//! (artist+city+year, artist+city, artist+year, multi-artist OR,
//! special-character, date-pattern). A strategy whose pattern does not
//! apply, or whose strict query finds no rows, returns an empty set -
//! "no match" is the designed fallthrough signal, never an error.

mod artist_city;
mod artist_city_year;
mod artist_year;
mod date_pattern;
mod multi_artist;
mod special_char;

pub use artist_city::ArtistCity;
pub use artist_city_year::ArtistCityYear;
pub use artist_year::ArtistYear;
pub use date_pattern::DatePattern;
pub use multi_artist::MultiArtistOr;
pub use special_char::SpecialCharacter;

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::db::{PosterId, PosterStore};
use crate::Result;

/// Per-query context shared by all strategies. All fields are borrowed;
/// nothing here outlives the search call.
pub struct SearchContext<'a> {
    /// Cleaned, stop-word-filtered term
    pub term: &'a str,
    /// Lowercase whitespace-split tokens of `term`
    pub tokens: &'a [String],
    /// Process-wide search policy
    pub config: &'a SearchConfig,
    /// Query executor seam
    pub store: &'a dyn PosterStore,
}

/// A self-contained interpretation of the query shape.
#[async_trait]
pub trait SearchStrategy: Send + Sync {
    /// Short name used in log events
    fn name(&self) -> &'static str;

    /// Attempt this interpretation. Empty result means "pattern does not
    /// apply or found nothing - try the next strategy".
    async fn attempt(&self, cx: &SearchContext<'_>) -> Result<Vec<PosterId>>;
}

/// The fixed priority order the orchestrator walks.
pub fn priority_order() -> Vec<Box<dyn SearchStrategy>> {
    vec![
        Box::new(ArtistCityYear),
        Box::new(ArtistCity),
        Box::new(ArtistYear),
        Box::new(MultiArtistOr),
        Box::new(SpecialCharacter),
        Box::new(DatePattern),
    ]
}
