//! Database connection pool management
//!
//! Provides PostgreSQL connection pooling using SQLx.

use roster_core::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::repository::RepositoryResult;

const SCHEMA: &str = include_str!("../migrations/0001_create_duty_schedules.sql");

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.pool_size,
            "Database pool created"
        );

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the roster tables when missing
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        for statement in schema_statements() {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Roster schema ensured");
        Ok(())
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

/// Statements of the bundled schema, one per prepared query
fn schema_statements() -> impl Iterator<Item = &'static str> {
    SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements() {
        let statements: Vec<_> = schema_statements().collect();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS duty_schedules"));
        assert!(statements[2].contains("ON DELETE CASCADE"));
    }
}
