// SQLite Connection Pool Setup

use joblist_core::error::{AppError, Result};
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Pool settings, overridable through `JOBLIST_*` environment variables
/// (JOBLIST_DATABASE_URL, JOBLIST_MAX_CONNECTIONS, JOBLIST_BUSY_TIMEOUT_SECS)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:joblist.db".to_string(),
            max_connections: 10,
            busy_timeout_secs: 5,
        }
    }
}

impl StoreConfig {
    /// Load settings from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::load().map_err(|e| AppError::Config(e.to_string()))
    }

    fn load() -> std::result::Result<Self, config::ConfigError> {
        let defaults = StoreConfig::default();
        config::Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("max_connections", defaults.max_connections as i64)?
            .set_default("busy_timeout_secs", defaults.busy_timeout_secs as i64)?
            .add_source(config::Environment::with_prefix("JOBLIST"))
            .build()?
            .try_deserialize()
    }
}

/// Create SQLite connection pool with WAL mode and default settings
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let config = StoreConfig {
        database_url: database_url.to_string(),
        ..StoreConfig::default()
    };
    create_pool_with(&config).await
}

/// Create SQLite connection pool from explicit settings
pub async fn create_pool_with(config: &StoreConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| AppError::Database(e.to_string()))?
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
        .foreign_keys(true)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(pool)
}
