//! The `top` command: best-scoring listings per channel.

use clap::Args;
use sqlx::PgPool;
use xpick_scoring::ScoreTier;

#[derive(Debug, Args)]
pub(crate) struct TopArgs {
    /// Rank by the independent-storefront score instead of the platform score
    #[arg(long)]
    pub independent: bool,
    #[arg(long, default_value_t = 20)]
    pub limit: i64,
}

pub(crate) async fn run(pool: &PgPool, args: TopArgs) -> anyhow::Result<()> {
    let rows = xpick_db::list_top_scored(pool, args.independent, args.limit.max(1)).await?;
    if rows.is_empty() {
        println!("no scored listings yet — run `xpick import` first");
        return Ok(());
    }

    let channel = if args.independent { "independent" } else { "platform" };
    println!("top {} listings by {channel} score", rows.len());
    for row in rows {
        let score = if args.independent {
            row.independent_score
        } else {
            row.platform_score
        };
        let tier = ScoreTier::for_score(score);
        println!(
            "{score:>7.2}  [{tier}]  {}  {}",
            row.asin.as_deref().unwrap_or("-"),
            row.title.as_deref().unwrap_or("(untitled)")
        );
    }
    Ok(())
}
