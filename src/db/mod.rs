//! Database connection and operations

pub mod directors;
pub mod movies;
pub mod schema_sync;

use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use directors::{CreateDirector, DirectorRecord, DirectorRepository};
pub use movies::{CreateMovie, MovieRecord, MovieRepository};
pub use schema_sync::SchemaSyncResult;

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

/// True for URLs that open a private in-memory database
fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new database connection pool.
    ///
    /// File databases are created (along with their parent directory) if missing.
    /// Names of tables that `sync_schema` would still create
    pub async fn missing_tables(&self) -> Result<Vec<&'static str>> {
        Ok(schema_sync::missing_tables(&self.pool).await?)
    }

    /// In-memory databases are pinned to a single long-lived connection, otherwise
    /// the data would vanish as soon as the pool recycled it.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = is_memory_url(url);
        if !in_memory
            && let Some(parent) = options.get_filename().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Connect, retrying every second until `timeout` elapses.
    pub async fn connect_with_retry(
        url: &str,
        max_connections: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let started = Instant::now();
        loop {
            match Self::connect(url, max_connections).await {
                Ok(db) => return Ok(db),
                Err(e) if started.elapsed() < timeout => {
                    tracing::warn!(error = %e, "Database connection failed, retrying in 1s");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
                Err(e) => {
                    return Err(e.context(format!(
                        "Database unavailable after {}s",
                        timeout.as_secs()
                    )));
                }
            }
        }
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a movies repository
    pub fn movies(&self) -> MovieRepository {
        MovieRepository::new(self.pool.clone())
    }

    /// Get a directors repository
    pub fn directors(&self) -> DirectorRepository {
        DirectorRepository::new(self.pool.clone())
    }

    /// Create any missing tables and indexes
    pub async fn sync_schema(&self) -> Result<SchemaSyncResult> {
        schema_sync::sync_schema(&self.pool)
            .await
            .context("Schema sync failed")
    }

    /// In-memory database with the schema applied, for tests
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect("sqlite::memory:", 1).await?;
        db.sync_schema().await?;
        Ok(db)
    }
}
