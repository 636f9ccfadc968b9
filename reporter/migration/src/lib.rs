pub use sea_orm_migration::prelude::*;

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection};

mod m20260121_000001_create_report_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260121_000001_create_report_tables::Migration)]
    }
}

// Postgres schema names we are willing to interpolate into DDL.
pub fn is_valid_namespace(namespace: &str) -> bool {
    let mut chars = namespace.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && namespace.len() <= 63
}

/// Creates the namespace (Postgres only) and the report tables if missing.
///
/// Tables are created unqualified, so the connection's search path must
/// already point at `namespace`; see `ConnectOptions::set_schema_search_path`.
/// Safe to call on every start.
pub async fn ensure_schema(db: &DatabaseConnection, namespace: &str) -> Result<(), DbErr> {
    if db.get_database_backend() == DatabaseBackend::Postgres {
        if !is_valid_namespace(namespace) {
            return Err(DbErr::Custom(format!(
                "Refusing to create schema with invalid name {namespace:?}"
            )));
        }
        db.execute_unprepared(&format!("CREATE SCHEMA IF NOT EXISTS \"{namespace}\""))
            .await?;
        log::info!("Schema {namespace} is present");
    }
    Migrator::up(db, None).await
}
