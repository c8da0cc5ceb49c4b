//! The `rescore` command: sweep rows with missing or zero scores.

use clap::Args;
use sqlx::PgPool;
use xpick_core::AppConfig;

#[derive(Debug, Args)]
pub(crate) struct RescoreArgs {
    /// Rows per page of the sweep
    #[arg(long, default_value_t = 500)]
    pub batch_size: i64,
}

pub(crate) async fn run(pool: &PgPool, config: &AppConfig, args: RescoreArgs) -> anyhow::Result<()> {
    let weights = crate::weights::effective(pool, config).await?;
    let processed = xpick_ingest::rescore(pool, &weights, args.batch_size.max(1)).await?;
    println!("rescored {processed} row(s)");
    Ok(())
}
