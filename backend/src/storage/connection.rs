use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// DbConnection owns the SQLite pool backing the staff and schedule tables
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and make sure the schema exists
    pub async fn new(url: &str) -> Result<Self> {
        info!("Opening database at {}", url);
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new().max_connections(5).connect_with(options).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Open a private in-memory database.
    ///
    /// Uses a single pooled connection so every query sees the same memory database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true))
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS staff (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                handle TEXT,
                staff_group TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schedule_entries (
                id TEXT PRIMARY KEY,
                staff_id TEXT NOT NULL,
                date TEXT NOT NULL,
                status TEXT NOT NULL,
                value INTEGER,
                note TEXT,
                updated_at TEXT NOT NULL,
                UNIQUE (staff_id, date),
                FOREIGN KEY (staff_id) REFERENCES staff (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Month views query by date range
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_schedule_entries_date
            ON schedule_entries(date);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
