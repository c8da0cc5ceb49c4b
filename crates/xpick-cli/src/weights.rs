//! Score weight inspection and seeding, plus the shared effective-weights
//! resolution used by import and rescore.

use anyhow::Context;
use clap::Subcommand;
use sqlx::PgPool;
use xpick_core::{AppConfig, ChannelWeight, ScoreWeights};

#[derive(Debug, Subcommand)]
pub(crate) enum WeightsCommand {
    /// Print the effective weight table
    Show,
    /// Write the configured weight table into the score_weights table
    Seed,
}

/// Resolve the weights a scoring run should use: built-in defaults, overlaid
/// with `config/weights.yaml` when present, overlaid with any rows persisted
/// in the `score_weights` table.
pub(crate) async fn effective(pool: &PgPool, config: &AppConfig) -> anyhow::Result<ScoreWeights> {
    let mut weights = if config.weights_path.exists() {
        xpick_core::load_weights_file(&config.weights_path).with_context(|| {
            format!(
                "loading weight overrides from {}",
                config.weights_path.display()
            )
        })?
    } else {
        ScoreWeights::default()
    };

    for row in xpick_db::list_score_weights(pool).await? {
        weights.set(
            &row.dimension,
            ChannelWeight::new(row.platform, row.independent),
        );
    }

    Ok(weights)
}

pub(crate) async fn run(
    pool: &PgPool,
    config: &AppConfig,
    command: WeightsCommand,
) -> anyhow::Result<()> {
    match command {
        WeightsCommand::Show => {
            let weights = effective(pool, config).await?;
            println!("{:<16} {:>9} {:>12}", "dimension", "platform", "independent");
            for (dimension, weight) in weights.rows() {
                println!(
                    "{dimension:<16} {:>9.3} {:>12.3}",
                    weight.platform, weight.independent
                );
            }
        }
        WeightsCommand::Seed => {
            let weights = if config.weights_path.exists() {
                xpick_core::load_weights_file(&config.weights_path)?
            } else {
                ScoreWeights::default()
            };
            xpick_db::upsert_score_weights(pool, &weights).await?;
            println!("seeded {} weight dimensions", weights.rows().len());
        }
    }
    Ok(())
}
