//! Integration tests for the search pipeline
//!
//! Drives the orchestrator end to end against an in-memory `PosterStore`
//! mock whose similarity function is deliberately simple (exact = 1.0,
//! substring = 0.5, else 0.0), so each query's strategy selection and
//! result set are fully predictable.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gigposter_search::config::Thresholds;
use gigposter_search::db::{PosterId, PosterStore};
use gigposter_search::{Result, SearchPipeline};

struct MockEvent {
    year: i32,
    city: &'static str,
    venue: &'static str,
}

struct MockPoster {
    id: PosterId,
    title: &'static str,
    description: &'static str,
    artists: Vec<&'static str>,
    events: Vec<MockEvent>,
}

/// In-memory stand-in for the relational store. Call counters expose which
/// executor the orchestrator ended up using.
#[derive(Default)]
struct MockStore {
    posters: Vec<MockPoster>,
    artist_calls: AtomicUsize,
    terms_calls: AtomicUsize,
    similarity_calls: AtomicUsize,
}

/// Toy trigram stand-in: exact (case-insensitive) equality scores 1.0,
/// substring containment either way scores 0.5, anything else 0.0.
fn sim(a: &str, b: &str) -> f32 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a.is_empty() || b.is_empty() {
        0.0
    } else if a == b {
        1.0
    } else if a.contains(&b) || b.contains(&a) {
        0.5
    } else {
        0.0
    }
}

/// Ordered-segment interpretation of an ILIKE pattern ("%AC%DC%").
fn like_matches(pattern: &str, text: &str) -> bool {
    let text = text.to_lowercase();
    let mut pos = 0;
    for segment in pattern.to_lowercase().split('%').filter(|s| !s.is_empty()) {
        match text[pos..].find(segment) {
            Some(found) => pos += found + segment.len(),
            None => return false,
        }
    }
    true
}

impl MockStore {
    fn new(posters: Vec<MockPoster>) -> Self {
        Self {
            posters,
            ..Self::default()
        }
    }

    fn best_artist_sim(&self, poster: &MockPoster, name: &str) -> f32 {
        poster
            .artists
            .iter()
            .map(|artist| sim(artist, name))
            .fold(0.0, f32::max)
    }
}

#[async_trait]
impl PosterStore for MockStore {
    async fn posters_by_artist_city_year(
        &self,
        artist: &str,
        city: &str,
        year: i32,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        Ok(self
            .posters
            .iter()
            .filter(|p| {
                self.best_artist_sim(p, artist) >= thresholds.artist
                    && p.events
                        .iter()
                        .any(|e| e.year == year && sim(e.city, city) >= thresholds.venue)
            })
            .map(|p| p.id)
            .collect())
    }

    async fn posters_by_artist_city(
        &self,
        artist: &str,
        city: &str,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        Ok(self
            .posters
            .iter()
            .filter(|p| {
                self.best_artist_sim(p, artist) >= thresholds.artist
                    && p.events.iter().any(|e| sim(e.city, city) >= thresholds.venue)
            })
            .map(|p| p.id)
            .collect())
    }

    async fn posters_by_artist_year(
        &self,
        artist: &str,
        year: i32,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        Ok(self
            .posters
            .iter()
            .filter(|p| {
                self.best_artist_sim(p, artist) >= thresholds.artist
                    && p.events.iter().any(|e| e.year == year)
            })
            .map(|p| p.id)
            .collect())
    }

    async fn posters_by_artist(&self, name: &str, threshold: f32) -> Result<Vec<PosterId>> {
        self.artist_calls.fetch_add(1, Ordering::SeqCst);
        let mut scored: Vec<(f32, PosterId)> = self
            .posters
            .iter()
            .filter_map(|p| {
                let score = self.best_artist_sim(p, name);
                (score >= threshold).then_some((score, p.id))
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap().then(a.1.cmp(&b.1)));
        Ok(scored.into_iter().map(|(_, id)| id).collect())
    }

    async fn posters_by_pattern(
        &self,
        raw: &str,
        like_pattern: &str,
        normalized: &str,
        threshold: f32,
        limit: i64,
    ) -> Result<Vec<PosterId>> {
        let mut ranked: Vec<(i32, PosterId)> = self
            .posters
            .iter()
            .filter_map(|p| {
                let exact = p
                    .artists
                    .iter()
                    .any(|a| a.to_lowercase() == raw.to_lowercase());
                let pattern = p.artists.iter().any(|a| like_matches(like_pattern, a))
                    || like_matches(like_pattern, p.title)
                    || like_matches(like_pattern, p.description);
                let similar = self.best_artist_sim(p, normalized) >= threshold;

                if exact {
                    Some((1, p.id))
                } else if pattern {
                    Some((2, p.id))
                } else if similar {
                    Some((3, p.id))
                } else {
                    None
                }
            })
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        ranked.truncate(limit as usize);
        Ok(ranked.into_iter().map(|(_, id)| id).collect())
    }

    async fn posters_by_terms(
        &self,
        term: &str,
        artist_terms: &[String],
        venue_terms: &[String],
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        self.terms_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .posters
            .iter()
            .filter(|p| {
                let artist_hit = artist_terms
                    .iter()
                    .any(|t| self.best_artist_sim(p, t) >= thresholds.artist);
                let venue_hit = venue_terms.iter().any(|t| {
                    p.events.iter().any(|e| {
                        sim(e.venue, t) >= thresholds.venue || sim(e.city, t) >= thresholds.venue
                    })
                });
                let poster_hit =
                    sim(p.title, term) >= thresholds.generic || sim(p.description, term) >= thresholds.generic;
                artist_hit || venue_hit || poster_hit
            })
            .map(|p| p.id)
            .collect())
    }

    async fn posters_by_similarity(
        &self,
        term: &str,
        thresholds: &Thresholds,
        limit: i64,
    ) -> Result<Vec<PosterId>> {
        self.similarity_calls.fetch_add(1, Ordering::SeqCst);
        let mut scored: Vec<(f32, PosterId)> = self
            .posters
            .iter()
            .filter_map(|p| {
                let poster_score = sim(p.title, term).max(sim(p.description, term));
                let artist_score = self.best_artist_sim(p, term);
                let event_score = p
                    .events
                    .iter()
                    .map(|e| sim(e.venue, term).max(sim(e.city, term)))
                    .fold(0.0, f32::max);

                let hit = poster_score >= thresholds.generic
                    || artist_score >= thresholds.artist
                    || event_score >= thresholds.venue;
                let overall = poster_score.max(artist_score).max(event_score);
                hit.then_some((overall, p.id))
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap().then(a.1.cmp(&b.1)));
        scored.truncate(limit as usize);
        Ok(scored.into_iter().map(|(_, id)| id).collect())
    }
}

/// Store that fails every query, for error-propagation tests
struct BrokenStore;

#[async_trait]
impl PosterStore for BrokenStore {
    async fn posters_by_artist_city_year(
        &self,
        _: &str,
        _: &str,
        _: i32,
        _: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        Err(sqlx::Error::PoolClosed.into())
    }
    async fn posters_by_artist_city(
        &self,
        _: &str,
        _: &str,
        _: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        Err(sqlx::Error::PoolClosed.into())
    }
    async fn posters_by_artist_year(
        &self,
        _: &str,
        _: i32,
        _: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        Err(sqlx::Error::PoolClosed.into())
    }
    async fn posters_by_artist(&self, _: &str, _: f32) -> Result<Vec<PosterId>> {
        Err(sqlx::Error::PoolClosed.into())
    }
    async fn posters_by_pattern(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: f32,
        _: i64,
    ) -> Result<Vec<PosterId>> {
        Err(sqlx::Error::PoolClosed.into())
    }
    async fn posters_by_terms(
        &self,
        _: &str,
        _: &[String],
        _: &[String],
        _: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        Err(sqlx::Error::PoolClosed.into())
    }
    async fn posters_by_similarity(
        &self,
        _: &str,
        _: &Thresholds,
        _: i64,
    ) -> Result<Vec<PosterId>> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

fn fixture() -> Vec<MockPoster> {
    vec![
        MockPoster {
            id: 1,
            title: "Phish Summer Tour",
            description: "Saratoga night one",
            artists: vec!["Phish"],
            events: vec![MockEvent {
                year: 2024,
                city: "Saratoga Springs",
                venue: "SPAC",
            }],
        },
        MockPoster {
            id: 2,
            title: "Grateful Dead Seattle",
            description: "Memorial coliseum show",
            artists: vec!["Grateful Dead"],
            events: vec![MockEvent {
                year: 1974,
                city: "Seattle",
                venue: "Memorial Coliseum",
            }],
        },
        MockPoster {
            id: 3,
            title: "Highway to Hell",
            description: "World tour print",
            artists: vec!["AC/DC"],
            events: vec![MockEvent {
                year: 1979,
                city: "Jacksonville",
                venue: "Coliseum",
            }],
        },
        MockPoster {
            id: 4,
            title: "AC DC tribute night",
            description: "Cover band benefit",
            artists: vec!["Thunderstruck"],
            events: vec![MockEvent {
                year: 2015,
                city: "Austin",
                venue: "Mohawk",
            }],
        },
        MockPoster {
            id: 5,
            title: "Widespread Panic New Years",
            description: "Philips arena run",
            artists: vec!["Widespread Panic", "Phish"],
            events: vec![MockEvent {
                year: 2011,
                city: "Atlanta",
                venue: "Philips Arena",
            }],
        },
        MockPoster {
            id: 6,
            title: "Panic in the Streets",
            description: "Athens broadcast",
            artists: vec!["Widespread Panic"],
            events: vec![MockEvent {
                year: 1998,
                city: "Athens",
                venue: "Classic Center",
            }],
        },
        MockPoster {
            id: 7,
            title: "Pearl Jam Vs tour",
            description: "Fall run",
            artists: vec!["Pearl Jam"],
            events: vec![MockEvent {
                year: 1994,
                city: "Boston",
                venue: "Orpheum",
            }],
        },
        MockPoster {
            id: 8,
            title: "Sasquatch Festival",
            description: "Gorge lineup print",
            artists: vec!["Various"],
            events: vec![MockEvent {
                year: 2012,
                city: "George",
                venue: "The Gorge",
            }],
        },
        MockPoster {
            id: 9,
            title: "Primus New Years Run",
            description: "Night two",
            artists: vec!["Primus"],
            events: vec![MockEvent {
                year: 1993,
                city: "San Francisco",
                venue: "The Fillmore",
            }],
        },
    ]
}

fn pipeline_with(store: Arc<MockStore>) -> SearchPipeline {
    SearchPipeline::new(store)
}

#[tokio::test]
async fn test_invalid_input_short_circuits_without_store_calls() {
    let store = Arc::new(MockStore::new(fixture()));
    let pipeline = pipeline_with(store.clone());

    assert!(pipeline.search("").await.unwrap().is_empty());
    assert!(pipeline.search("   ").await.unwrap().is_empty());
    assert!(pipeline.search("a").await.unwrap().is_empty());

    assert_eq!(store.artist_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.terms_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.similarity_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_full_date_query_resolves_via_date_pattern() {
    let pipeline = pipeline_with(Arc::new(MockStore::new(fixture())));

    let ids = pipeline.search("Phish 6/30/2024").await.unwrap();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_special_character_artist_ranked_by_priority() {
    let pipeline = pipeline_with(Arc::new(MockStore::new(fixture())));

    let ids = pipeline.search("AC/DC").await.unwrap();
    // Exact artist-name match outranks the wildcard title match
    assert_eq!(ids, vec![3, 4]);
}

#[tokio::test]
async fn test_artist_city_query() {
    let pipeline = pipeline_with(Arc::new(MockStore::new(fixture())));

    let ids = pipeline.search("Grateful Dead Seattle").await.unwrap();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_artist_year_query() {
    let pipeline = pipeline_with(Arc::new(MockStore::new(fixture())));

    let ids = pipeline.search("Pearl Jam 1994").await.unwrap();
    assert_eq!(ids, vec![7]);
}

#[tokio::test]
async fn test_multi_artist_or_unions_and_dedups() {
    let store = Arc::new(MockStore::new(fixture()));
    let pipeline = pipeline_with(store.clone());

    let ids = pipeline.search("Phish OR Widespread Panic").await.unwrap();
    // Poster 5 carries both artists and must appear exactly once
    assert_eq!(ids, vec![1, 5, 6]);
    assert_eq!(store.artist_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_single_word_query_reaches_single_term_fallback() {
    let store = Arc::new(MockStore::new(fixture()));
    let pipeline = pipeline_with(store.clone());

    let ids = pipeline.search("sasquatch").await.unwrap();
    assert_eq!(ids, vec![8]);
    assert_eq!(store.similarity_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.terms_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_venue_query_reaches_complex_fallback() {
    let store = Arc::new(MockStore::new(fixture()));
    let pipeline = pipeline_with(store.clone());

    let ids = pipeline.search("grateful dead red rocks").await.unwrap();
    assert_eq!(ids, vec![2]);
    assert_eq!(store.terms_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.similarity_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_single_token_venue_query_reaches_complex_fallback() {
    let store = Arc::new(MockStore::new(fixture()));
    let pipeline = pipeline_with(store.clone());

    // One token, but venue-likely: the term itself becomes the venue candidate
    let ids = pipeline.search("fillmore").await.unwrap();
    assert_eq!(ids, vec![9]);
    assert_eq!(store.terms_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.similarity_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let pipeline = SearchPipeline::new(Arc::new(BrokenStore));

    let result = pipeline.search("phish").await;
    assert!(result.is_err());
}
