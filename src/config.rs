//! Environment configuration for the maintenance CLI.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::{MaintenanceError, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings, read from the environment:
///
///   SWAN_DATABASE_URL        — Postgres connection string (required)
///   SWAN_DB_MAX_CONNECTIONS  — pool size (default: 5)
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl MaintenanceConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("SWAN_DATABASE_URL")
            .map_err(|_| MaintenanceError::Config("SWAN_DATABASE_URL must be set".into()))?;
        let max_connections = std::env::var("SWAN_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        Ok(Self {
            database_url,
            max_connections,
        })
    }

    pub async fn connect(&self) -> Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await?;
        Ok(pool)
    }
}
