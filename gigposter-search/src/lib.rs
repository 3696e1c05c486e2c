//! # GigPoster Search Core
//!
//! Fuzzy poster search pipeline for the GigPoster marketplace backend:
//! - Term sanitation and stop-word filtering
//! - Lexical classifiers (venue likelihood, city names, special characters)
//! - Date and year extraction
//! - Candidate artist/venue/city term generation
//! - Pattern-handler strategies tried in fixed priority order
//! - Trigram-similarity query executors over PostgreSQL (`pg_trgm`)
//! - Orchestrator with generic complex/single-term fallback
//!
//! The surrounding web application (catalog CRUD, uploads, auth) lives
//! elsewhere; this crate owns only the interpretation of free-text poster
//! queries and the read-only queries they resolve to.

pub mod classify;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod sanitize;
pub mod search;
pub mod strategy;
pub mod terms;

pub use error::{Error, Result};
pub use search::SearchPipeline;
