use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;

use carnage_reporter::config::{self, Config};
use carnage_reporter::{database, pipeline};

/// Loads carnage report files into the match database.
#[derive(Parser, Debug)]
struct Args {
    /// TOML config file. Without it, defaults plus the flags below are used.
    config: Option<PathBuf>,
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,
    #[arg(long)]
    reports_dir: Option<PathBuf>,
    /// Create the schema and tables before ingesting.
    #[arg(long)]
    ensure_schema: bool,
}

async fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config: Config = match &args.config {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .context(format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&text).context("Failed to parse config")?
        }
        None => Config::default(),
    };
    if let Some(url) = &args.database_url {
        config.database_url = url.clone();
    }
    if let Some(dir) = &args.reports_dir {
        config.reports_dir = dir.clone();
    }
    config::validate(&config).map_err(|e| anyhow!("Config validation failed: {e}"))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("sqlx", log::LevelFilter::Error)
        .init();
    let args = Args::parse();
    let config = load_config(&args).await?;
    let db = database::connect(&config.database_url, &config.schema)
        .await
        .context("Failed to connect to the database")?;
    if args.ensure_schema {
        migration::ensure_schema(&db, &config.schema)
            .await
            .context("Failed to provision the database schema")?;
    }
    let summary = pipeline::run(&db, &config.reports_dir, &config.selection).await?;
    log::info!("Done: {summary}");
    Ok(())
}
