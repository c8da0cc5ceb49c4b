//! Database operations for the trend dimension tables and the
//! `trend_observations` fact table.
//!
//! The write functions take `&mut PgConnection` so that the ingestion
//! pipeline can run all four steps of one observation inside a single
//! transaction; the read functions operate on the pool directly.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use xpick_core::TrendObservation;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `trend_observations` fact table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendObservationRow {
    pub id: i64,
    pub source_id: String,
    pub country: String,
    pub category_key: String,
    pub window_period: String,
    pub keyword: String,
    pub rank: Option<i32>,
    pub raw_score: Option<f64>,
    pub meta: serde_json::Value,
    pub collected_at: DateTime<Utc>,
}

/// A row from the `trend_sources` registry.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendSourceRow {
    pub source_id: String,
    pub display_name: String,
}

/// A row from the `country_map` dimension table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CountryMapRow {
    pub country: String,
    pub search_geo: String,
    pub social_region: String,
}

/// Optional filters for [`list_latest_observations`]; `None` fields match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct TrendFilter {
    pub source_id: Option<String>,
    pub country: Option<String>,
    pub category_key: Option<String>,
    pub window_period: Option<String>,
}

// ---------------------------------------------------------------------------
// Dimension upserts (transaction-scoped)
// ---------------------------------------------------------------------------

/// Ensures a source registry row exists; conflicts update the display name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_trend_source(
    conn: &mut PgConnection,
    source_id: &str,
    display_name: &str,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO trend_sources (source_id, display_name) \
         VALUES ($1, $2) \
         ON CONFLICT (source_id) DO UPDATE SET display_name = EXCLUDED.display_name",
    )
    .bind(source_id)
    .bind(display_name)
    .execute(conn)
    .await?;
    Ok(())
}

/// Ensures a country mapping row exists; conflicts update both mapping
/// columns with the latest values.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_country_mapping(
    conn: &mut PgConnection,
    country: &str,
    search_geo: &str,
    social_region: &str,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO country_map (country, search_geo, social_region) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (country) DO UPDATE SET \
             search_geo    = EXCLUDED.search_geo, \
             social_region = EXCLUDED.social_region",
    )
    .bind(country)
    .bind(search_geo)
    .bind(social_region)
    .execute(conn)
    .await?;
    Ok(())
}

/// Ensures a category registry row exists. Category identity never changes,
/// so conflicts do nothing.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn ensure_trend_category(
    conn: &mut PgConnection,
    category_key: &str,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO trend_categories (category_key) \
         VALUES ($1) \
         ON CONFLICT (category_key) DO NOTHING",
    )
    .bind(category_key)
    .execute(conn)
    .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Fact operations (transaction-scoped)
// ---------------------------------------------------------------------------

/// Inserts an observation fact row, ignoring logical-key duplicates.
///
/// `collected_at` falls back to `NOW()` server-side when the observation
/// carries none. Returns `true` when a row was inserted, `false` when the
/// key already existed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_observation(
    conn: &mut PgConnection,
    obs: &TrendObservation,
) -> Result<bool, DbError> {
    let rows_affected = sqlx::query(
        "INSERT INTO trend_observations \
             (source_id, country, category_key, window_period, keyword, \
              rank, raw_score, meta, collected_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8::jsonb, '{}'::jsonb), COALESCE($9, NOW())) \
         ON CONFLICT ON CONSTRAINT trend_observations_logical_key DO NOTHING",
    )
    .bind(&obs.source_id)
    .bind(&obs.country)
    .bind(&obs.category_key)
    .bind(&obs.window_period)
    .bind(&obs.keyword)
    .bind(obs.rank)
    .bind(obs.raw_score)
    .bind(&obs.meta)
    .bind(obs.collected_at)
    .execute(conn)
    .await?
    .rows_affected();

    Ok(rows_affected > 0)
}

/// Deletes any existing rows for an observation's logical key.
///
/// Used by replace-on-recollect ingestion before the fresh insert. Returns
/// the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_observations_for_key(
    conn: &mut PgConnection,
    obs: &TrendObservation,
) -> Result<u64, DbError> {
    let rows_affected = sqlx::query(
        "DELETE FROM trend_observations \
         WHERE source_id = $1 AND country = $2 AND category_key = $3 \
           AND window_period = $4 AND keyword = $5",
    )
    .bind(&obs.source_id)
    .bind(&obs.country)
    .bind(&obs.category_key)
    .bind(&obs.window_period)
    .bind(&obs.keyword)
    .execute(conn)
    .await?
    .rows_affected();

    Ok(rows_affected)
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

/// Keyword search over the fact table, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_trend_keywords(
    pool: &PgPool,
    pattern: &str,
    limit: i64,
) -> Result<Vec<TrendObservationRow>, DbError> {
    let like = format!("%{pattern}%");
    let rows = sqlx::query_as::<_, TrendObservationRow>(
        "SELECT id, source_id, country, category_key, window_period, keyword, \
                rank, raw_score, meta, collected_at \
         FROM trend_observations \
         WHERE keyword ILIKE $1 \
         ORDER BY collected_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(like)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Returns the most recent observations matching the filter, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_latest_observations(
    pool: &PgPool,
    filter: &TrendFilter,
    limit: i64,
) -> Result<Vec<TrendObservationRow>, DbError> {
    let rows = sqlx::query_as::<_, TrendObservationRow>(
        "SELECT id, source_id, country, category_key, window_period, keyword, \
                rank, raw_score, meta, collected_at \
         FROM trend_observations \
         WHERE ($1::TEXT IS NULL OR source_id = $1) \
           AND ($2::TEXT IS NULL OR country = $2) \
           AND ($3::TEXT IS NULL OR category_key = $3) \
           AND ($4::TEXT IS NULL OR window_period = $4) \
         ORDER BY collected_at DESC, id DESC \
         LIMIT $5",
    )
    .bind(&filter.source_id)
    .bind(&filter.country)
    .bind(&filter.category_key)
    .bind(&filter.window_period)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Returns all registered trend sources.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_trend_sources(pool: &PgPool) -> Result<Vec<TrendSourceRow>, DbError> {
    let rows = sqlx::query_as::<_, TrendSourceRow>(
        "SELECT source_id, display_name FROM trend_sources ORDER BY source_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Returns all known country mappings.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_trend_countries(pool: &PgPool) -> Result<Vec<CountryMapRow>, DbError> {
    let rows = sqlx::query_as::<_, CountryMapRow>(
        "SELECT country, search_geo, social_region FROM country_map ORDER BY country",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Returns all known category keys.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_trend_categories(pool: &PgPool) -> Result<Vec<String>, DbError> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT category_key FROM trend_categories ORDER BY category_key",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
