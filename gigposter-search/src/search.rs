//! Search orchestrator
//!
//! Runs the pipeline end to end: sanitize the raw term, walk the pattern
//! handlers in priority order, and fall back to the generic complex or
//! single-term similarity search when no specialized interpretation
//! produces results. The first non-empty result set wins.

use std::sync::Arc;

use tracing::debug;

use crate::classify::is_likely_venue_search;
use crate::config::SearchConfig;
use crate::db::{PosterId, PosterStore};
use crate::sanitize::{filter_stop_words, validate_and_clean};
use crate::strategy::{self, SearchContext, SearchStrategy};
use crate::terms::{generate_potential_artist_terms, generate_potential_venue_terms};
use crate::Result;

/// The fuzzy poster search pipeline. One instance per process; every
/// `search` call is independent and carries no shared mutable state.
pub struct SearchPipeline {
    store: Arc<dyn PosterStore>,
    config: Arc<SearchConfig>,
    strategies: Vec<Box<dyn SearchStrategy>>,
}

impl SearchPipeline {
    /// Create a pipeline with the compiled default policy.
    pub fn new(store: Arc<dyn PosterStore>) -> Self {
        Self::with_config(store, SearchConfig::default())
    }

    /// Create a pipeline with an explicit policy (e.g. loaded from TOML).
    pub fn with_config(store: Arc<dyn PosterStore>, config: SearchConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            strategies: strategy::priority_order(),
        }
    }

    /// Run a fuzzy poster search for a raw user-supplied term.
    ///
    /// Returns deduplicated poster ids, relevance-ranked where the winning
    /// query defines a ranking and first-match order otherwise. Invalid
    /// input (empty, all-whitespace, shorter than 2 characters) returns an
    /// empty list without touching the store. Store failures propagate.
    pub async fn search(&self, raw: &str) -> Result<Vec<PosterId>> {
        let Some(cleaned) = validate_and_clean(raw) else {
            debug!("search term rejected by sanitizer");
            return Ok(Vec::new());
        };

        let term = filter_stop_words(&cleaned, &self.config.stop_words);
        let tokens: Vec<String> = term
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        let cx = SearchContext {
            term: &term,
            tokens: &tokens,
            config: &self.config,
            store: self.store.as_ref(),
        };

        for strategy in &self.strategies {
            let ids = strategy.attempt(&cx).await?;
            if !ids.is_empty() {
                debug!(
                    strategy = strategy.name(),
                    results = ids.len(),
                    "specialized strategy matched"
                );
                return Ok(ids);
            }
        }

        let venue_likely = is_likely_venue_search(&term, &self.config);
        if tokens.len() >= 3 || venue_likely {
            debug!(venue_likely, "falling back to complex multi-term search");
            let artist_terms = generate_potential_artist_terms(&term, &tokens, venue_likely);
            let mut venue_terms = generate_potential_venue_terms(&term, &tokens);
            // A venue-likely single token has no suffix candidates; the
            // term itself is the venue candidate then
            if venue_terms.is_empty() && venue_likely {
                venue_terms.push(term.clone());
            }
            self.store
                .posters_by_terms(&term, &artist_terms, &venue_terms, &self.config.thresholds)
                .await
        } else {
            debug!("falling back to single-term similarity search");
            self.store
                .posters_by_similarity(&term, &self.config.thresholds, self.config.caps.single_term)
                .await
        }
    }

    /// The active search policy.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
