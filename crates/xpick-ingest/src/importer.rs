//! Spreadsheet-row import: extract, mirror the image, insert, score.
//!
//! Rows arrive as loosely-typed JSON maps (spreadsheet parsing happens
//! upstream). Each row is classified as inserted, skipped (duplicate ASIN),
//! or invalid (no identity, or no ranking signal); the file record tracks
//! the final tallies.

use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;
use xpick_core::ScoreWeights;
use xpick_db::NewProductRow;
use xpick_scoring::{aliases, compute_scores, extract_number, extract_string};

use crate::error::IngestError;
use crate::images::{is_http_url, ImageFetcher};

/// Spreadsheet data starts on row 2; index 0 of the parsed batch maps to
/// that row in the original file.
const HEADER_ROW_OFFSET: i32 = 2;

/// Final tallies for one processed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub inserted: u32,
    pub skipped: u32,
    pub invalid: u32,
}

/// Identity fields a row must carry to be importable.
#[derive(Debug, Default)]
struct RowIdentity {
    asin: Option<String>,
    url: Option<String>,
    title: Option<String>,
}

impl RowIdentity {
    fn from_row(row: &Map<String, Value>) -> Self {
        Self {
            asin: opt_string(row, aliases::ASIN),
            url: opt_string(row, aliases::URL),
            title: opt_string(row, aliases::TITLE),
        }
    }

    /// A row with neither ASIN nor URL cannot be tracked and is invalid.
    fn is_importable(&self) -> bool {
        self.asin.is_some() || self.url.is_some()
    }
}

/// Processes a batch of raw spreadsheet rows for one import file.
///
/// Walks the file through `processing` and into `done` with the final
/// counts (or `error` on a hard failure). When a fetcher is supplied, rows
/// carrying an http(s) image URL get their image mirrored through the
/// bounded side-task pool after the rows are written; image failures keep
/// the remote URL and never fail the row.
///
/// # Errors
///
/// Returns [`IngestError::Db`] on store failures outside the per-row
/// skip/invalid contract (the file record is marked `error` first).
pub async fn process_rows(
    pool: &PgPool,
    fetcher: Option<&ImageFetcher>,
    file_id: Uuid,
    rows: &[Value],
    weights: &ScoreWeights,
) -> Result<ImportStats, IngestError> {
    xpick_db::start_import(pool, file_id).await?;

    match process_rows_inner(pool, fetcher, file_id, rows, weights).await {
        Ok(stats) => {
            #[allow(clippy::cast_possible_wrap)]
            xpick_db::complete_import(
                pool,
                file_id,
                stats.inserted as i32,
                stats.skipped as i32,
                stats.invalid as i32,
            )
            .await?;
            Ok(stats)
        }
        Err(e) => {
            if let Err(mark_err) = xpick_db::fail_import(pool, file_id, &e.to_string()).await {
                tracing::error!(
                    %file_id,
                    error = %mark_err,
                    "failed to mark import file as errored"
                );
            }
            Err(e)
        }
    }
}

async fn process_rows_inner(
    pool: &PgPool,
    fetcher: Option<&ImageFetcher>,
    file_id: Uuid,
    rows: &[Value],
    weights: &ScoreWeights,
) -> Result<ImportStats, IngestError> {
    let mut stats = ImportStats::default();
    let mut pending_images: Vec<(i64, String)> = Vec::new();

    for (index, value) in rows.iter().enumerate() {
        let Some(row) = value.as_object() else {
            stats.invalid += 1;
            continue;
        };

        let identity = RowIdentity::from_row(row);
        if !identity.is_importable() {
            stats.invalid += 1;
            continue;
        }

        let image_url = opt_string(row, aliases::IMAGE_URL);
        let brand = opt_string(row, aliases::BRAND);
        let category = opt_string(row, aliases::CATEGORY);

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let new_row = NewProductRow {
            file_id,
            row_index: index as i32 + HEADER_ROW_OFFSET,
            asin: identity.asin.as_deref(),
            url: identity.url.as_deref(),
            title: identity.title.as_deref(),
            image_url: image_url.as_deref(),
            brand: brand.as_deref(),
            category: category.as_deref(),
            price: opt_number(row, aliases::PRICE),
            asin_sales: opt_number(row, aliases::ASIN_SALES),
            review_count: opt_number(row, aliases::REVIEW_COUNT),
            review_rating: opt_number(row, aliases::REVIEW_RATING),
            data: value,
        };

        let Some(row_id) = xpick_db::insert_product_row(pool, &new_row).await? else {
            stats.skipped += 1;
            continue;
        };

        let scores = compute_scores(row, weights);
        if scores.platform_score == 0.0 && scores.independent_score == 0.0 {
            // No ranking signal at all; keep the table clean.
            xpick_db::delete_product_row(pool, row_id).await?;
            stats.invalid += 1;
            continue;
        }
        xpick_db::upsert_product_scores(
            pool,
            row_id,
            scores.platform_score,
            scores.independent_score,
        )
        .await?;
        stats.inserted += 1;

        if fetcher.is_some() {
            if let Some(url) = image_url.filter(|u| is_http_url(u)) {
                pending_images.push((row_id, url));
            }
        }
    }

    if let Some(fetcher) = fetcher {
        for (row_id, stored) in fetcher.fetch_batch(pending_images).await {
            if let Some(path) = stored {
                xpick_db::set_product_image_url(pool, row_id, &path.display().to_string())
                    .await?;
            }
        }
    }

    Ok(stats)
}

/// Recomputes scores for rows whose scores are missing or zero.
///
/// Sweeps the table in keyset-paginated batches, recomputing each row from
/// its stored raw payload with the supplied weights. Returns the number of
/// rows processed.
///
/// # Errors
///
/// Returns [`IngestError::Db`] if a page read or score upsert fails.
pub async fn rescore(
    pool: &PgPool,
    weights: &ScoreWeights,
    batch_size: i64,
) -> Result<u64, IngestError> {
    let mut last_id: Option<i64> = None;
    let mut processed = 0u64;

    loop {
        let page = xpick_db::list_unscored_rows(pool, last_id, batch_size).await?;
        let Some(last) = page.last() else { break };
        last_id = Some(last.row_id);
        let page_len = page.len();

        for row in page {
            let Some(map) = row.data.as_object() else {
                continue;
            };
            let scores = compute_scores(map, weights);
            xpick_db::upsert_product_scores(
                pool,
                row.row_id,
                scores.platform_score,
                scores.independent_score,
            )
            .await?;
            processed += 1;
        }

        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        if (page_len as i64) < batch_size {
            break;
        }
    }

    Ok(processed)
}

fn opt_string(row: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let s = extract_string(row, keys, "");
    (!s.is_empty()).then_some(s)
}

fn opt_number(row: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    let n = extract_number(row, keys, f64::NAN);
    n.is_finite().then_some(n)
}
