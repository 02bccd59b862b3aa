//! Director database repository

use anyhow::Result;
use sqlx::SqlitePool;

/// Director record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DirectorRecord {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

/// Input for creating a director
#[derive(Debug)]
pub struct CreateDirector {
    pub name: String,
    pub surname: String,
}

pub struct DirectorRepository {
    pool: SqlitePool,
}

impl DirectorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every director in insertion order
    pub async fn list(&self) -> Result<Vec<DirectorRecord>> {
        let records = sqlx::query_as::<_, DirectorRecord>(
            "SELECT id, name, surname FROM directors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get a director by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<DirectorRecord>> {
        let record = sqlx::query_as::<_, DirectorRecord>(
            "SELECT id, name, surname FROM directors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get several directors in one query. Unknown IDs are skipped.
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<DirectorRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "SELECT id, name, surname FROM directors WHERE id IN ({}) ORDER BY id",
            placeholders.join(", ")
        );

        let mut query = sqlx::query_as::<_, DirectorRecord>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Insert a new director. Matching names are not deduplicated.
    pub async fn create(&self, input: CreateDirector) -> Result<DirectorRecord> {
        let record = sqlx::query_as::<_, DirectorRecord>(
            "INSERT INTO directors (name, surname) VALUES (?, ?) RETURNING id, name, surname",
        )
        .bind(&input.name)
        .bind(&input.surname)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::Database;

    fn director(name: &str, surname: &str) -> CreateDirector {
        CreateDirector {
            name: name.to_string(),
            surname: surname.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_never_deduplicates() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.directors();

        let first = repo.create(director("Agnès", "Varda")).await.unwrap();
        let second = repo.create(director("Agnès", "Varda")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.directors();

        let kurosawa = repo.create(director("Akira", "Kurosawa")).await.unwrap();
        let ozu = repo.create(director("Yasujirō", "Ozu")).await.unwrap();

        let found = repo.find_by_ids(&[ozu.id, 404, kurosawa.id]).await.unwrap();
        assert_eq!(found, vec![kurosawa.clone(), ozu]);

        assert_eq!(repo.find_by_id(kurosawa.id).await.unwrap(), Some(kurosawa));
        assert_eq!(repo.find_by_id(404).await.unwrap(), None);
        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
    }
}
