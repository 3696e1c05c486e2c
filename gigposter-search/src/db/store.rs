//! Query executors over the relational store
//!
//! `PosterStore` is the seam between the interpretation pipeline and the
//! database: every resolved interpretation maps to one executor method, and
//! each method returns deduplicated poster ids. The Postgres implementation
//! relies on the `pg_trgm` extension for `similarity()` in WHERE and ORDER
//! BY clauses; all user-derived text reaches the database through bind
//! parameters only.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::Thresholds;
use crate::db::models::PosterId;
use crate::Result;

/// Read-only query capabilities the search pipeline needs from the store.
///
/// An empty result set is the designed "no match" signal; errors are
/// reserved for genuine execution failures (bad connection, malformed
/// query), which propagate to the caller unchanged.
#[async_trait]
pub trait PosterStore: Send + Sync {
    /// Strict match: artist similarity AND city similarity AND event year.
    async fn posters_by_artist_city_year(
        &self,
        artist: &str,
        city: &str,
        year: i32,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>>;

    /// Strict match: artist similarity AND city similarity.
    async fn posters_by_artist_city(
        &self,
        artist: &str,
        city: &str,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>>;

    /// Strict match: artist similarity AND event year.
    async fn posters_by_artist_year(
        &self,
        artist: &str,
        year: i32,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>>;

    /// Single-artist similarity match, ordered by descending similarity.
    async fn posters_by_artist(&self, name: &str, threshold: f32) -> Result<Vec<PosterId>>;

    /// Special-character match: exact name, wildcard pattern over artist
    /// name and poster text, or similarity on the space-normalized variant.
    /// Ranked by match priority (exact > pattern > similarity), capped.
    async fn posters_by_pattern(
        &self,
        raw: &str,
        like_pattern: &str,
        normalized: &str,
        threshold: f32,
        limit: i64,
    ) -> Result<Vec<PosterId>>;

    /// Complex multi-term search: OR across artist-term similarity,
    /// venue-field similarity and whole-term poster similarity.
    async fn posters_by_terms(
        &self,
        term: &str,
        artist_terms: &[String],
        venue_terms: &[String],
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>>;

    /// Single-term search scoring the best of poster, artist and
    /// event/venue similarity per poster, capped.
    async fn posters_by_similarity(
        &self,
        term: &str,
        thresholds: &Thresholds,
        limit: i64,
    ) -> Result<Vec<PosterId>>;
}

/// `PosterStore` implementation over a PostgreSQL pool.
pub struct PgPosterStore {
    pool: PgPool,
}

impl PgPosterStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PosterStore for PgPosterStore {
    async fn posters_by_artist_city_year(
        &self,
        artist: &str,
        city: &str,
        year: i32,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        let ids = sqlx::query_scalar::<_, PosterId>(
            "SELECT DISTINCT p.id
             FROM posters p
             JOIN poster_artists pa ON pa.poster_id = p.id
             JOIN artists a ON a.id = pa.artist_id
             JOIN poster_events pe ON pe.poster_id = p.id
             JOIN events e ON e.id = pe.event_id
             JOIN venues v ON v.id = e.venue_id
             WHERE similarity(lower(a.name), lower($1)) >= $2
               AND similarity(lower(v.city), lower($3)) >= $4
               AND EXTRACT(YEAR FROM e.event_date)::int = $5
             ORDER BY p.id",
        )
        .bind(artist)
        .bind(thresholds.artist)
        .bind(city)
        .bind(thresholds.venue)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn posters_by_artist_city(
        &self,
        artist: &str,
        city: &str,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        let ids = sqlx::query_scalar::<_, PosterId>(
            "SELECT DISTINCT p.id
             FROM posters p
             JOIN poster_artists pa ON pa.poster_id = p.id
             JOIN artists a ON a.id = pa.artist_id
             JOIN poster_events pe ON pe.poster_id = p.id
             JOIN events e ON e.id = pe.event_id
             JOIN venues v ON v.id = e.venue_id
             WHERE similarity(lower(a.name), lower($1)) >= $2
               AND similarity(lower(v.city), lower($3)) >= $4
             ORDER BY p.id",
        )
        .bind(artist)
        .bind(thresholds.artist)
        .bind(city)
        .bind(thresholds.venue)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn posters_by_artist_year(
        &self,
        artist: &str,
        year: i32,
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        let ids = sqlx::query_scalar::<_, PosterId>(
            "SELECT DISTINCT p.id
             FROM posters p
             JOIN poster_artists pa ON pa.poster_id = p.id
             JOIN artists a ON a.id = pa.artist_id
             JOIN poster_events pe ON pe.poster_id = p.id
             JOIN events e ON e.id = pe.event_id
             WHERE similarity(lower(a.name), lower($1)) >= $2
               AND EXTRACT(YEAR FROM e.event_date)::int = $3
             ORDER BY p.id",
        )
        .bind(artist)
        .bind(thresholds.artist)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn posters_by_artist(&self, name: &str, threshold: f32) -> Result<Vec<PosterId>> {
        let ids = sqlx::query_scalar::<_, PosterId>(
            "SELECT p.id
             FROM posters p
             JOIN poster_artists pa ON pa.poster_id = p.id
             JOIN artists a ON a.id = pa.artist_id
             WHERE similarity(lower(a.name), lower($1)) >= $2
             GROUP BY p.id
             ORDER BY max(similarity(lower(a.name), lower($1))) DESC, p.id",
        )
        .bind(name)
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn posters_by_pattern(
        &self,
        raw: &str,
        like_pattern: &str,
        normalized: &str,
        threshold: f32,
        limit: i64,
    ) -> Result<Vec<PosterId>> {
        // DISTINCT ON keeps the best (lowest) match priority per poster;
        // the outer query ranks across posters and applies the cap.
        let ids = sqlx::query_scalar::<_, PosterId>(
            "SELECT id FROM (
                 SELECT DISTINCT ON (p.id)
                        p.id,
                        CASE
                            WHEN lower(a.name) = lower($1) THEN 1
                            WHEN a.name ILIKE $2
                                 OR p.title ILIKE $2
                                 OR coalesce(p.description, '') ILIKE $2 THEN 2
                            ELSE 3
                        END AS match_priority,
                        similarity(lower(a.name), lower($3)) AS name_score
                 FROM posters p
                 LEFT JOIN poster_artists pa ON pa.poster_id = p.id
                 LEFT JOIN artists a ON a.id = pa.artist_id
                 WHERE lower(a.name) = lower($1)
                    OR a.name ILIKE $2
                    OR p.title ILIKE $2
                    OR coalesce(p.description, '') ILIKE $2
                    OR similarity(lower(a.name), lower($3)) >= $4
                 ORDER BY p.id, match_priority
             ) ranked
             ORDER BY match_priority, name_score DESC NULLS LAST, id
             LIMIT $5",
        )
        .bind(raw)
        .bind(like_pattern)
        .bind(normalized)
        .bind(threshold)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn posters_by_terms(
        &self,
        term: &str,
        artist_terms: &[String],
        venue_terms: &[String],
        thresholds: &Thresholds,
    ) -> Result<Vec<PosterId>> {
        let ids = sqlx::query_scalar::<_, PosterId>(
            "SELECT DISTINCT p.id
             FROM posters p
             LEFT JOIN poster_artists pa ON pa.poster_id = p.id
             LEFT JOIN artists a ON a.id = pa.artist_id
             LEFT JOIN poster_events pe ON pe.poster_id = p.id
             LEFT JOIN events e ON e.id = pe.event_id
             LEFT JOIN venues v ON v.id = e.venue_id
             WHERE EXISTS (
                       SELECT 1 FROM unnest($2::text[]) AS art(term)
                       WHERE similarity(lower(a.name), lower(art.term)) >= $4
                   )
                OR EXISTS (
                       SELECT 1 FROM unnest($3::text[]) AS ven(term)
                       WHERE similarity(lower(v.name), lower(ven.term)) >= $5
                          OR similarity(lower(v.city), lower(ven.term)) >= $5
                          OR similarity(lower(coalesce(v.state, '')), lower(ven.term)) >= $5
                          OR similarity(lower(v.country), lower(ven.term)) >= $5
                   )
                OR similarity(
                       lower(p.title || ' ' || coalesce(p.description, '')),
                       lower($1)
                   ) >= $6
             ORDER BY p.id",
        )
        .bind(term)
        .bind(artist_terms)
        .bind(venue_terms)
        .bind(thresholds.artist)
        .bind(thresholds.venue)
        .bind(thresholds.generic)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn posters_by_similarity(
        &self,
        term: &str,
        thresholds: &Thresholds,
        limit: i64,
    ) -> Result<Vec<PosterId>> {
        // Score each poster by the best similarity in each category, filter
        // by per-category thresholds, order by overall best score.
        let ids = sqlx::query_scalar::<_, PosterId>(
            "SELECT id FROM (
                 SELECT p.id,
                        GREATEST(
                            similarity(lower(p.title), lower($1)),
                            similarity(lower(coalesce(p.description, '')), lower($1))
                        ) AS poster_score,
                        coalesce((
                            SELECT max(similarity(lower(a.name), lower($1)))
                            FROM poster_artists pa
                            JOIN artists a ON a.id = pa.artist_id
                            WHERE pa.poster_id = p.id
                        ), 0) AS artist_score,
                        coalesce((
                            SELECT max(GREATEST(
                                similarity(lower(e.name), lower($1)),
                                similarity(lower(v.name), lower($1)),
                                similarity(lower(v.city), lower($1)),
                                similarity(lower(coalesce(v.state, '')), lower($1)),
                                similarity(lower(v.country), lower($1))
                            ))
                            FROM poster_events pe
                            JOIN events e ON e.id = pe.event_id
                            JOIN venues v ON v.id = e.venue_id
                            WHERE pe.poster_id = p.id
                        ), 0) AS event_score
                 FROM posters p
             ) scored
             WHERE poster_score >= $2
                OR artist_score >= $3
                OR event_score >= $4
             ORDER BY GREATEST(poster_score, artist_score, event_score) DESC, id
             LIMIT $5",
        )
        .bind(term)
        .bind(thresholds.generic)
        .bind(thresholds.artist)
        .bind(thresholds.venue)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
