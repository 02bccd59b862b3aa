//! Schema synchronization at startup
//!
//! Tables are declared as `CREATE TABLE IF NOT EXISTS` statements and applied in
//! order, so running the sync against an existing database is a no-op. Column
//! renames and type changes are not handled.

use sqlx::SqlitePool;
use tracing::{debug, info};

/// Result of a schema sync operation
#[derive(Debug, Default)]
pub struct SchemaSyncResult {
    pub tables_created: Vec<String>,
}

/// Tables in dependency order (directors before the movies that reference them)
const TABLES: &[(&str, &str)] = &[
    (
        "directors",
        r#"
        CREATE TABLE IF NOT EXISTS directors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            surname TEXT NOT NULL
        )
        "#,
    ),
    (
        "movies",
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            year INTEGER NOT NULL,
            director_id INTEGER REFERENCES directors (id) ON DELETE SET NULL
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_movies_director_id ON movies (director_id)",
    "CREATE INDEX IF NOT EXISTS idx_movies_title ON movies (title)",
];

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Tables the service needs that are not present yet
pub async fn missing_tables(pool: &SqlitePool) -> Result<Vec<&'static str>, sqlx::Error> {
    let mut missing = Vec::new();
    for &(table_name, _) in TABLES {
        if !table_exists(pool, table_name).await? {
            missing.push(table_name);
        }
    }
    Ok(missing)
}

/// Create all missing tables and indexes
pub async fn sync_schema(pool: &SqlitePool) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut result = SchemaSyncResult::default();

    for &(table_name, create_sql) in TABLES {
        if table_exists(pool, table_name).await? {
            debug!(table = table_name, "Table already exists");
            continue;
        }

        sqlx::query(create_sql).execute(pool).await?;
        info!(table = table_name, "Created table");
        result.tables_created.push(table_name.to_string());
    }

    for &index_sql in INDEXES {
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(result)
}
