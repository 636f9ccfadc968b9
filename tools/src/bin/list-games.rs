use clap::Parser;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use carnage_db as db;
use carnage_reporter::database;

#[derive(Parser, Debug)]
struct Config {
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    db: String,
    #[arg(long, default_value = "h3mcc")]
    schema: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .filter_module("sqlx", log::LevelFilter::Error)
        .init();
    let cfg = Config::parse();
    let db = database::connect(&cfg.db, &cfg.schema).await?;
    let games = db::games::Entity::find()
        .order_by_asc(db::games::Column::Timestamp)
        .all(&db)
        .await?;
    for game in &games {
        let players = db::players::Entity::find()
            .filter(db::players::Column::GameUniqueId.eq(game.game_unique_id))
            .count(&db)
            .await?;
        println!(
            "{} {} {:<28} {:<16} {} players",
            game.timestamp, game.game_unique_id, game.map_name, game.hopper_name, players
        );
    }
    println!("{} games", games.len());
    Ok(())
}
