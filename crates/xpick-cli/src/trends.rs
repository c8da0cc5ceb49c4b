//! The `trends` subcommands: observation ingestion and queries.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use sqlx::PgPool;
use xpick_core::{ConflictMode, TrendObservation};
use xpick_db::TrendFilter;

#[derive(Debug, Subcommand)]
pub(crate) enum TrendsCommand {
    /// Ingest a JSON file holding one observation or an array of them
    Ingest(IngestArgs),
    /// Query stored observations
    Query(QueryArgs),
}

#[derive(Debug, Args)]
pub(crate) struct IngestArgs {
    pub observations_file: PathBuf,
    /// Replace prior rows for each logical key instead of keeping the first
    #[arg(long)]
    pub replace: bool,
}

#[derive(Debug, Args)]
pub(crate) struct QueryArgs {
    /// Substring keyword search (newest first)
    #[arg(long)]
    pub keyword: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub window: Option<String>,
    #[arg(long, default_value_t = 20)]
    pub limit: i64,
}

pub(crate) async fn run(pool: &PgPool, command: TrendsCommand) -> anyhow::Result<()> {
    match command {
        TrendsCommand::Ingest(args) => {
            let raw = std::fs::read_to_string(&args.observations_file)
                .with_context(|| format!("reading {}", args.observations_file.display()))?;
            let observations = parse_observations(&raw)
                .context("observations file must be a JSON observation or array of them")?;

            let mode = if args.replace {
                ConflictMode::Replace
            } else {
                ConflictMode::InsertOrIgnore
            };
            let summary = xpick_ingest::ingest_observations(pool, &observations, mode).await?;
            println!(
                "ingested {} observation(s): {} ok, {} failed",
                observations.len(),
                summary.ok,
                summary.failed
            );
        }
        TrendsCommand::Query(args) => {
            let rows = if let Some(keyword) = &args.keyword {
                xpick_db::search_trend_keywords(pool, keyword, args.limit.max(1)).await?
            } else {
                let filter = TrendFilter {
                    source_id: args.source,
                    country: args.country,
                    category_key: args.category,
                    window_period: args.window,
                };
                xpick_db::list_latest_observations(pool, &filter, args.limit.max(1)).await?
            };

            if rows.is_empty() {
                println!("no matching observations");
                return Ok(());
            }
            for row in rows {
                println!(
                    "{}  {}  {}/{}  {:<4} #{:<3} {}  score={}",
                    row.collected_at.format("%Y-%m-%d %H:%M"),
                    row.source_id,
                    row.country,
                    row.category_key,
                    row.window_period,
                    row.rank.map_or_else(|| "-".to_string(), |r| r.to_string()),
                    row.keyword,
                    row.raw_score
                        .map_or_else(|| "-".to_string(), |s| format!("{s:.1}")),
                );
            }
        }
    }
    Ok(())
}

/// The ingestion boundary accepts a single observation object or an array.
fn parse_observations(raw: &str) -> Result<Vec<TrendObservation>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.is_array() {
        serde_json::from_value(value)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}
