//! Movie database repository

use anyhow::{Result, anyhow};
use sqlx::SqlitePool;

/// Movie record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub director_id: Option<i64>,
}

/// Input for creating a movie. New movies never have a director.
#[derive(Debug)]
pub struct CreateMovie {
    pub title: String,
    pub year: i32,
}

const MOVIE_COLUMNS: &str = "id, title, year, director_id";

pub struct MovieRepository {
    pool: SqlitePool,
}

impl MovieRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every movie in insertion order
    pub async fn list(&self) -> Result<Vec<MovieRecord>> {
        let sql = format!("SELECT {} FROM movies ORDER BY id", MOVIE_COLUMNS);
        let records = sqlx::query_as::<_, MovieRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Get a movie by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<MovieRecord>> {
        let sql = format!("SELECT {} FROM movies WHERE id = ?", MOVIE_COLUMNS);
        let record = sqlx::query_as::<_, MovieRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Find movies whose title matches exactly.
    ///
    /// At most two rows are fetched: enough for callers to tell a unique match
    /// from an ambiguous one without loading every duplicate.
    pub async fn find_by_title(&self, title: &str) -> Result<Vec<MovieRecord>> {
        let sql = format!(
            "SELECT {} FROM movies WHERE title = ? ORDER BY id LIMIT 2",
            MOVIE_COLUMNS
        );
        let records = sqlx::query_as::<_, MovieRecord>(&sql)
            .bind(title)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// List the movies of several directors in one query
    pub async fn list_by_directors(&self, director_ids: &[i64]) -> Result<Vec<MovieRecord>> {
        if director_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=director_ids.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "SELECT {} FROM movies WHERE director_id IN ({}) ORDER BY id",
            MOVIE_COLUMNS,
            placeholders.join(", ")
        );

        let mut query = sqlx::query_as::<_, MovieRecord>(&sql);
        for id in director_ids {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Create a new movie without a director
    pub async fn create(&self, input: CreateMovie) -> Result<MovieRecord> {
        let sql = format!(
            "INSERT INTO movies (title, year) VALUES (?, ?) RETURNING {}",
            MOVIE_COLUMNS
        );
        let record = sqlx::query_as::<_, MovieRecord>(&sql)
            .bind(&input.title)
            .bind(input.year)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    /// Write every field of an existing movie back to the database
    pub async fn save(&self, movie: &MovieRecord) -> Result<MovieRecord> {
        let sql = format!(
            "UPDATE movies SET title = ?, year = ?, director_id = ? WHERE id = ? RETURNING {}",
            MOVIE_COLUMNS
        );
        sqlx::query_as::<_, MovieRecord>(&sql)
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.director_id)
            .bind(movie.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| anyhow!("Movie {} no longer exists", movie.id))
    }

    /// Delete a loaded movie
    pub async fn delete(&self, movie: &MovieRecord) -> Result<bool> {
        self.delete_by_id(movie.id).await
    }

    /// Delete a movie by ID, returning whether a row was removed
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::{CreateDirector, Database};

    fn new_movie(title: &str, year: i32) -> CreateMovie {
        CreateMovie {
            title: title.to_string(),
            year,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.movies();

        let created = repo.create(new_movie("Alien", 1979)).await.unwrap();
        assert_eq!(created.title, "Alien");
        assert_eq!(created.year, 1979);
        assert_eq!(created.director_id, None);

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(repo.find_by_id(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.movies();

        repo.create(new_movie("Heat", 1995)).await.unwrap();
        repo.create(new_movie("Arrival", 2016)).await.unwrap();

        let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Heat", "Arrival"]);
    }

    #[tokio::test]
    async fn test_find_by_title() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.movies();

        repo.create(new_movie("Solaris", 1972)).await.unwrap();
        assert_eq!(repo.find_by_title("Solaris").await.unwrap().len(), 1);
        assert!(repo.find_by_title("solaris").await.unwrap().is_empty());

        repo.create(new_movie("Solaris", 2002)).await.unwrap();
        repo.create(new_movie("Solaris", 2030)).await.unwrap();
        assert_eq!(repo.find_by_title("Solaris").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_updates_fields() {
        let db = Database::in_memory().await.unwrap();
        let director = db
            .directors()
            .create(CreateDirector {
                name: "Ridley".to_string(),
                surname: "Scott".to_string(),
            })
            .await
            .unwrap();

        let mut movie = db.movies().create(new_movie("Blade Runer", 1982)).await.unwrap();
        movie.title = "Blade Runner".to_string();
        movie.director_id = Some(director.id);

        let saved = db.movies().save(&movie).await.unwrap();
        assert_eq!(saved, movie);
        assert_eq!(db.movies().find_by_id(movie.id).await.unwrap(), Some(movie));
    }

    #[tokio::test]
    async fn test_save_missing_movie_fails() {
        let db = Database::in_memory().await.unwrap();
        let ghost = MovieRecord {
            id: 77,
            title: "Ghost".to_string(),
            year: 1990,
            director_id: None,
        };

        assert!(db.movies().save(&ghost).await.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.movies();

        let movie = repo.create(new_movie("Jaws", 1975)).await.unwrap();
        assert!(repo.delete(&movie).await.unwrap());
        assert!(!repo.delete_by_id(movie.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_directors() {
        let db = Database::in_memory().await.unwrap();
        let directors = db.directors();
        let nolan = directors
            .create(CreateDirector {
                name: "Christopher".to_string(),
                surname: "Nolan".to_string(),
            })
            .await
            .unwrap();

        let mut memento = db.movies().create(new_movie("Memento", 2000)).await.unwrap();
        memento.director_id = Some(nolan.id);
        db.movies().save(&memento).await.unwrap();
        db.movies().create(new_movie("Unrelated", 2001)).await.unwrap();

        let movies = db.movies().list_by_directors(&[nolan.id, 555]).await.unwrap();
        assert_eq!(movies, vec![memento]);
        assert!(db.movies().list_by_directors(&[]).await.unwrap().is_empty());
    }
}
