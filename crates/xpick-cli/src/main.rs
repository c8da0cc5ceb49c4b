use clap::{Parser, Subcommand};

mod import;
mod rescore;
mod top;
mod trends;
mod verify_images;
mod weights;

#[derive(Debug, Parser)]
#[command(name = "xpick")]
#[command(about = "Cross-border product selection toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Import a JSON rows file exported from a marketplace spreadsheet
    Import(import::ImportArgs),
    /// Recompute scores for rows with missing or zero scores
    Rescore(rescore::RescoreArgs),
    /// List the best-scoring listings for one channel
    Top(top::TopArgs),
    /// Trend observation ingestion and queries
    #[command(subcommand)]
    Trends(trends::TrendsCommand),
    /// Inspect or seed the score weight table
    #[command(subcommand)]
    Weights(weights::WeightsCommand),
    /// HEAD-check stored product image URLs
    VerifyImages(verify_images::VerifyImagesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = xpick_core::load_app_config_from_env()?;
    let pool = xpick_db::connect_pool(
        &config.database_url,
        xpick_db::PoolConfig::from_app_config(&config),
    )
    .await?;

    match cli.command {
        Commands::Migrate => {
            let applied = xpick_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Import(args) => import::run(&pool, &config, args).await?,
        Commands::Rescore(args) => rescore::run(&pool, &config, args).await?,
        Commands::Top(args) => top::run(&pool, args).await?,
        Commands::Trends(command) => trends::run(&pool, command).await?,
        Commands::Weights(command) => weights::run(&pool, &config, command).await?,
        Commands::VerifyImages(args) => verify_images::run(&pool, &config, args).await?,
    }

    Ok(())
}
