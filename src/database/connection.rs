use crate::config::DatabaseConfig;
use crate::logging::log_database_operation;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Instant;

/// Embedded schema migrations from `migrations/`
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Build the pool and, when configured, bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let started = Instant::now();
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;

        log_database_operation(
            "connect",
            None,
            None,
            "connected",
            Some(started.elapsed().as_millis() as u64),
            None,
        );

        let connection = Self { pool };
        if config.run_migrations {
            connection.migrate().await?;
        }
        Ok(connection)
    }

    /// Wrap an existing pool (tests, embedding applications)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        MIGRATOR.run(&self.pool).await?;
        log_database_operation("migrate", None, None, "up_to_date", None, None);
        Ok(())
    }

    pub async fn health_check(&self) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 as health")
            .fetch_one(&self.pool)
            .await?;

        let health: i32 = row.get("health");
        Ok(health == 1)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
