//! Database operations for `product_rows` and `product_scores`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `product_rows` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub file_id: Uuid,
    pub row_index: i32,
    pub asin: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub asin_sales: Option<f64>,
    pub review_count: Option<f64>,
    pub review_rating: Option<f64>,
    /// The full raw spreadsheet row, as imported.
    pub data: serde_json::Value,
    pub imported_at: DateTime<Utc>,
}

/// Insert payload for one imported listing row.
#[derive(Debug)]
pub struct NewProductRow<'a> {
    pub file_id: Uuid,
    pub row_index: i32,
    pub asin: Option<&'a str>,
    pub url: Option<&'a str>,
    pub title: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: Option<f64>,
    pub asin_sales: Option<f64>,
    pub review_count: Option<f64>,
    pub review_rating: Option<f64>,
    pub data: &'a serde_json::Value,
}

/// A row pending (re)scoring: the internal id plus the raw payload.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UnscoredRow {
    pub row_id: i64,
    pub data: serde_json::Value,
}

/// An image URL stored on a product row, for verification sweeps.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductImageRow {
    pub row_id: i64,
    pub title: Option<String>,
    pub image_url: String,
}

// ---------------------------------------------------------------------------
// product_rows operations
// ---------------------------------------------------------------------------

/// Inserts a listing row, skipping ASIN duplicates.
///
/// Conflicts on the partial unique index over `asin` are a no-op; the
/// caller counts the row as skipped. Returns `Some(id)` when a row was
/// inserted, `None` on a duplicate.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_product_row(
    pool: &PgPool,
    row: &NewProductRow<'_>,
) -> Result<Option<i64>, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO product_rows \
             (file_id, row_index, asin, url, title, image_url, brand, category, \
              price, asin_sales, review_count, review_rating, data) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13::jsonb) \
         ON CONFLICT (asin) WHERE asin IS NOT NULL DO NOTHING \
         RETURNING id",
    )
    .bind(row.file_id)
    .bind(row.row_index)
    .bind(row.asin)
    .bind(row.url)
    .bind(row.title)
    .bind(row.image_url)
    .bind(row.brand)
    .bind(row.category)
    .bind(row.price)
    .bind(row.asin_sales)
    .bind(row.review_count)
    .bind(row.review_rating)
    .bind(row.data)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Deletes a listing row (cascades to its score).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_product_row(pool: &PgPool, row_id: i64) -> Result<(), DbError> {
    sqlx::query("DELETE FROM product_rows WHERE id = $1")
        .bind(row_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Overwrites the stored image URL for a row after the side-task stored a
/// local copy.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn set_product_image_url(
    pool: &PgPool,
    row_id: i64,
    image_url: &str,
) -> Result<(), DbError> {
    sqlx::query("UPDATE product_rows SET image_url = $1 WHERE id = $2")
        .bind(image_url)
        .bind(row_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns all rows that carry an image URL, for the verification sweep.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_product_image_urls(pool: &PgPool) -> Result<Vec<ProductImageRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductImageRow>(
        "SELECT id AS row_id, title, image_url \
         FROM product_rows \
         WHERE image_url IS NOT NULL \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// product_scores operations
// ---------------------------------------------------------------------------

/// Upserts the dual composite scores for a row.
///
/// Conflicts on `row_id` overwrite both scores and refresh `scored_at`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_product_scores(
    pool: &PgPool,
    row_id: i64,
    platform_score: f64,
    independent_score: f64,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO product_scores (row_id, platform_score, independent_score) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (row_id) DO UPDATE SET \
             platform_score    = EXCLUDED.platform_score, \
             independent_score = EXCLUDED.independent_score, \
             scored_at         = NOW()",
    )
    .bind(row_id)
    .bind(platform_score)
    .bind(independent_score)
    .execute(pool)
    .await?;
    Ok(())
}

/// A scored listing, for the recommendation views.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoredProductRow {
    pub row_id: i64,
    pub asin: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub platform_score: f64,
    pub independent_score: f64,
}

/// Returns the best-scoring listings for one channel, highest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_top_scored(
    pool: &PgPool,
    independent: bool,
    limit: i64,
) -> Result<Vec<ScoredProductRow>, DbError> {
    let sql = if independent {
        "SELECT r.id AS row_id, r.asin, r.title, r.price, \
                s.platform_score, s.independent_score \
         FROM product_rows r \
         JOIN product_scores s ON s.row_id = r.id \
         ORDER BY s.independent_score DESC, r.id \
         LIMIT $1"
    } else {
        "SELECT r.id AS row_id, r.asin, r.title, r.price, \
                s.platform_score, s.independent_score \
         FROM product_rows r \
         JOIN product_scores s ON s.row_id = r.id \
         ORDER BY s.platform_score DESC, r.id \
         LIMIT $1"
    };
    let rows = sqlx::query_as::<_, ScoredProductRow>(sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Returns one page of rows whose scores are missing or zero, for the
/// rescore sweep.
///
/// Keyset-paginated on `row_id`: pass the last id of the previous page (or
/// `None` for the first) and rows come back in ascending id order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_unscored_rows(
    pool: &PgPool,
    after_id: Option<i64>,
    limit: i64,
) -> Result<Vec<UnscoredRow>, DbError> {
    let rows = sqlx::query_as::<_, UnscoredRow>(
        "SELECT r.id AS row_id, r.data \
         FROM product_rows r \
         LEFT JOIN product_scores s ON s.row_id = r.id \
         WHERE (s.row_id IS NULL OR s.platform_score = 0 OR s.independent_score = 0) \
           AND ($1::BIGINT IS NULL OR r.id > $1) \
         ORDER BY r.id \
         LIMIT $2",
    )
    .bind(after_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
