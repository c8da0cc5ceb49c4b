//! The `import` command: process a JSON rows file through the import
//! pipeline.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use sqlx::PgPool;
use xpick_core::AppConfig;
use xpick_ingest::ImageFetcher;

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// Path to a JSON array of spreadsheet rows
    pub rows_file: PathBuf,
    /// Skip the image mirror side-task
    #[arg(long)]
    pub no_images: bool,
    /// Display name recorded on the import; defaults to the file name
    #[arg(long)]
    pub filename: Option<String>,
}

pub(crate) async fn run(pool: &PgPool, config: &AppConfig, args: ImportArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.rows_file)
        .with_context(|| format!("reading {}", args.rows_file.display()))?;
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&raw).context("rows file must be a JSON array of row objects")?;

    let filename = args.filename.unwrap_or_else(|| {
        args.rows_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import.json".to_string())
    });

    let fetcher = if args.no_images {
        None
    } else {
        Some(ImageFetcher::from_app_config(config)?)
    };
    let weights = crate::weights::effective(pool, config).await?;

    let file = xpick_db::create_import_file(pool, &filename).await?;
    let stats =
        xpick_ingest::process_rows(pool, fetcher.as_ref(), file.id, &rows, &weights).await?;

    println!(
        "{filename}: {} inserted, {} skipped, {} invalid ({} rows total)",
        stats.inserted,
        stats.skipped,
        stats.invalid,
        rows.len()
    );
    Ok(())
}
