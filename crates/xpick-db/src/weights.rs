//! Database operations for the `score_weights` table.

use sqlx::PgPool;
use xpick_core::{ChannelWeight, ScoreWeights};

use crate::DbError;

/// A row from the `score_weights` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeightRow {
    pub dimension: String,
    pub platform: f64,
    pub independent: f64,
}

/// Returns all persisted weight rows, ordered by dimension name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_score_weights(pool: &PgPool) -> Result<Vec<WeightRow>, DbError> {
    let rows = sqlx::query_as::<_, WeightRow>(
        "SELECT dimension, platform, independent FROM score_weights ORDER BY dimension",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Persists all sixteen dimensions of a weight table.
///
/// Conflicts on `dimension` overwrite both channel weights in place.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any upsert fails.
pub async fn upsert_score_weights(pool: &PgPool, weights: &ScoreWeights) -> Result<(), DbError> {
    for (dimension, weight) in weights.rows() {
        sqlx::query(
            "INSERT INTO score_weights (dimension, platform, independent) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (dimension) DO UPDATE SET \
                 platform    = EXCLUDED.platform, \
                 independent = EXCLUDED.independent, \
                 updated_at  = NOW()",
        )
        .bind(dimension)
        .bind(weight.platform)
        .bind(weight.independent)
        .execute(pool)
        .await?;
    }
    Ok(())
}

/// The effective weight table: defaults overlaid with any persisted rows.
///
/// Rows naming a dimension the engine does not know are ignored — the table
/// may outlive a rename on the code side.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn load_effective_weights(pool: &PgPool) -> Result<ScoreWeights, DbError> {
    let mut weights = ScoreWeights::default();
    for row in list_score_weights(pool).await? {
        weights.set(
            &row.dimension,
            ChannelWeight::new(row.platform, row.independent),
        );
    }
    Ok(weights)
}
