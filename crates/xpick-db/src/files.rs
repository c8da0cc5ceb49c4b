//! Database operations for `import_files` upload bookkeeping.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `import_files` table.
///
/// `status` walks `queued → processing → done` (or `error`); the counts are
/// written once when processing finishes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImportFileRow {
    pub id: Uuid,
    pub filename: String,
    pub status: String,
    pub inserted_count: i32,
    pub skipped_count: i32,
    pub invalid_count: i32,
    pub error_message: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Creates a new import file record in `queued` status.
///
/// Generates the UUID in Rust and returns the full newly-created row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_import_file(pool: &PgPool, filename: &str) -> Result<ImportFileRow, DbError> {
    let id = Uuid::new_v4();

    let row = sqlx::query_as::<_, ImportFileRow>(
        "INSERT INTO import_files (id, filename, status) \
         VALUES ($1, $2, 'queued') \
         RETURNING id, filename, status, inserted_count, skipped_count, invalid_count, \
                   error_message, processed_at, created_at",
    )
    .bind(id)
    .bind(filename)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a file as `processing`.
///
/// # Errors
///
/// Returns [`DbError::InvalidImportTransition`] if the file is not `queued`,
/// or [`DbError::Sqlx`] if the update fails.
pub async fn start_import(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE import_files SET status = 'processing' \
         WHERE id = $1 AND status = 'queued'",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidImportTransition {
            id,
            expected_status: "queued",
        });
    }

    Ok(())
}

/// Marks a file as `done`, writing the final counts and `processed_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::InvalidImportTransition`] if the file is not
/// `processing`, or [`DbError::Sqlx`] if the update fails.
pub async fn complete_import(
    pool: &PgPool,
    id: Uuid,
    inserted: i32,
    skipped: i32,
    invalid: i32,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE import_files \
         SET status = 'done', inserted_count = $1, skipped_count = $2, \
             invalid_count = $3, processed_at = NOW() \
         WHERE id = $4 AND status = 'processing'",
    )
    .bind(inserted)
    .bind(skipped)
    .bind(invalid)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidImportTransition {
            id,
            expected_status: "processing",
        });
    }

    Ok(())
}

/// Marks a file as `error` with a message and `processed_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::InvalidImportTransition`] if the file is not
/// `processing`, or [`DbError::Sqlx`] if the update fails.
pub async fn fail_import(pool: &PgPool, id: Uuid, error_message: &str) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE import_files \
         SET status = 'error', error_message = $1, processed_at = NOW() \
         WHERE id = $2 AND status = 'processing'",
    )
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidImportTransition {
            id,
            expected_status: "processing",
        });
    }

    Ok(())
}

/// Fetches a single import file by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists, or [`DbError::Sqlx`] if
/// the query fails.
pub async fn get_import_file(pool: &PgPool, id: Uuid) -> Result<ImportFileRow, DbError> {
    let row = sqlx::query_as::<_, ImportFileRow>(
        "SELECT id, filename, status, inserted_count, skipped_count, invalid_count, \
                error_message, processed_at, created_at \
         FROM import_files WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}
