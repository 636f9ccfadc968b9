use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::selection::Selection;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Usually supplied with --database-url or DATABASE_URL instead.
    #[serde(default)]
    pub database_url: String,
    // Postgres schema holding the report tables.
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    #[serde(default)]
    pub selection: Selection,
}

fn default_schema() -> String {
    "h3mcc".to_owned()
}

fn default_reports_dir() -> PathBuf {
    "Maps_to_Rename".into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: String::new(),
            schema: default_schema(),
            reports_dir: default_reports_dir(),
            selection: Selection::default(),
        }
    }
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.database_url.trim().is_empty() {
        return Err("database_url is not set".to_owned());
    }
    if !migration::is_valid_namespace(&cfg.schema) {
        return Err(format!("schema {:?} is not a valid schema name", cfg.schema));
    }
    if cfg.selection.extension.is_empty() {
        return Err("selection.extension must not be empty".to_owned());
    }
    Ok(())
}
