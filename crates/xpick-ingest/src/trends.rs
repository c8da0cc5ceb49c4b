//! Per-observation transactional ingestion of trend batches.
//!
//! Each observation runs as one atomic unit: ensure the three dimension
//! rows it references, then write the fact row per the selected
//! [`ConflictMode`]. A failed observation rolls back alone and is tallied;
//! the rest of the batch continues.

use sqlx::{Acquire, PgConnection, PgPool};
use xpick_core::{source_display_name, ConflictMode, TrendObservation};
use xpick_db::DbError;

/// Per-batch ingestion tallies. A duplicate logical key under
/// insert-or-ignore counts as `ok` — the desired end state (the row exists)
/// is achieved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub ok: u32,
    pub failed: u32,
}

/// Ingests a batch of trend observations, one transaction per row.
///
/// Rows commit and roll back independently; the summary reports how many
/// succeeded and how many failed. Failed rows are logged at warn with
/// their logical key.
///
/// # Errors
///
/// Only a connection-level failure that prevents processing any row at all
/// (the initial pool acquire) propagates; per-row store errors are
/// converted into `failed` tallies.
pub async fn ingest_observations(
    pool: &PgPool,
    observations: &[TrendObservation],
    mode: ConflictMode,
) -> Result<IngestSummary, DbError> {
    let mut conn = pool.acquire().await?;
    let mut summary = IngestSummary::default();

    for obs in observations {
        match ingest_one(&mut conn, obs, mode).await {
            Ok(inserted) => {
                summary.ok += 1;
                if !inserted {
                    tracing::debug!(
                        source = %obs.source_id,
                        country = %obs.country,
                        keyword = %obs.keyword,
                        "observation already present — kept existing row"
                    );
                }
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(
                    source = %obs.source_id,
                    country = %obs.country,
                    category = %obs.category_key,
                    window = %obs.window_period,
                    keyword = %obs.keyword,
                    error = %e,
                    "trend observation rolled back"
                );
            }
        }
    }

    Ok(summary)
}

/// One observation: dimension upserts plus the fact write, atomically.
///
/// Returns `true` when a fact row was written, `false` when an existing row
/// was kept under insert-or-ignore.
async fn ingest_one(
    conn: &mut PgConnection,
    obs: &TrendObservation,
    mode: ConflictMode,
) -> Result<bool, DbError> {
    let mut tx = conn.begin().await?;

    xpick_db::upsert_trend_source(&mut tx, &obs.source_id, &source_display_name(&obs.source_id))
        .await?;

    let (search_geo, social_region) = obs.region();
    xpick_db::upsert_country_mapping(&mut tx, &obs.country, &search_geo, &social_region).await?;

    xpick_db::ensure_trend_category(&mut tx, &obs.category_key).await?;

    if mode == ConflictMode::Replace {
        xpick_db::delete_observations_for_key(&mut tx, obs).await?;
    }
    let inserted = xpick_db::insert_observation(&mut tx, obs).await?;

    tx.commit().await?;
    Ok(inserted)
}
