//! The `verify-images` command: HEAD-check stored product image URLs.

use clap::Args;
use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use sqlx::PgPool;
use xpick_core::AppConfig;

#[derive(Debug, Args)]
pub(crate) struct VerifyImagesArgs {
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,
}

/// Verify remote image URLs currently stored on product rows.
///
/// Locally mirrored images (non-http paths) are skipped; non-200 URLs are
/// logged for cleanup and aggregate totals printed.
pub(crate) async fn run(
    pool: &PgPool,
    config: &AppConfig,
    args: VerifyImagesArgs,
) -> anyhow::Result<()> {
    let rows = xpick_db::list_product_image_urls(pool).await?;
    let targets: Vec<_> = rows
        .into_iter()
        .filter(|row| {
            let lower = row.image_url.to_ascii_lowercase();
            lower.starts_with("http://") || lower.starts_with("https://")
        })
        .collect();

    if targets.is_empty() {
        println!("no remote image URLs found to verify");
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.image_request_timeout_secs))
        .user_agent(config.image_user_agent.clone())
        .build()?;

    let checks = stream::iter(targets.into_iter().map(|row| {
        let client = client.clone();
        async move {
            let result = client.head(&row.image_url).send().await;
            (row, result)
        }
    }))
    .buffer_unordered(args.concurrency.max(1))
    .collect::<Vec<_>>()
    .await;

    let mut ok_count = 0usize;
    let mut bad_count = 0usize;
    for (row, result) in checks {
        match result {
            Ok(resp) if resp.status() == StatusCode::OK => {
                ok_count += 1;
            }
            Ok(resp) => {
                bad_count += 1;
                tracing::warn!(
                    row_id = row.row_id,
                    title = row.title.as_deref().unwrap_or("(untitled)"),
                    status = resp.status().as_u16(),
                    url = %row.image_url,
                    "image URL verification failed"
                );
            }
            Err(e) => {
                bad_count += 1;
                tracing::warn!(
                    row_id = row.row_id,
                    title = row.title.as_deref().unwrap_or("(untitled)"),
                    error = %e,
                    url = %row.image_url,
                    "image URL verification failed"
                );
            }
        }
    }

    println!("verified image URLs: {ok_count} OK, {bad_count} bad");
    Ok(())
}
