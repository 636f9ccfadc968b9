use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connects to the report database. On Postgres, unqualified table names
/// resolve to `schema`.
pub async fn connect(url: &str, schema: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .sqlx_logging(false)
        .connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(CONNECT_TIMEOUT);
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        options.set_schema_search_path(schema.to_owned());
    }
    let db = Database::connect(options).await?;
    log::debug!("Connected to {:?} database", db.get_database_backend());
    Ok(db)
}
