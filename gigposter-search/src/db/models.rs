//! Identifier types for the marketplace entities
//!
//! The poster, artist, event and venue tables (and their `poster_artists` /
//! `poster_events` association tables) are owned by the surrounding
//! application. The search core reads them but returns only poster
//! identifiers; the API layer hydrates ids into full poster payloads.

/// Poster identifier as stored in the `posters` table.
pub type PosterId = i64;
