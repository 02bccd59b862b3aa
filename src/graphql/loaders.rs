//! GraphQL DataLoaders for batching database queries
//!
//! Resolving `allMovies { director { name } }` naively costs one director lookup
//! per movie. The `director` field resolver instead calls
//! `DataLoader<DirectorLoader>::load_one`, which collects every key requested
//! in the same execution tick and issues a single `WHERE id IN (...)` query.
//! `DirectorType.movieSet` does the same for the reverse relation.
//!
//! The loaders are registered on the schema without a cache, so nothing is
//! remembered between requests and a movie re-pointed at another director is
//! visible immediately.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_graphql::dataloader::Loader;

use crate::db::{Database, DirectorRecord, MovieRecord};

/// Running totals of the batches a loader has issued
#[derive(Debug, Default)]
pub struct LoadStats {
    batches: AtomicUsize,
    keys: AtomicUsize,
}

impl LoadStats {
    /// Record one batch, returning its sequence number
    fn record(&self, key_count: usize) -> usize {
        self.keys.fetch_add(key_count, Ordering::Relaxed);
        self.batches.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::Relaxed)
    }

    pub fn keys(&self) -> usize {
        self.keys.load(Ordering::Relaxed)
    }
}

/// Batch-loads directors by primary key
pub struct DirectorLoader {
    db: Database,
    stats: Arc<LoadStats>,
}

impl DirectorLoader {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            stats: Arc::default(),
        }
    }

    /// Shared handle on this loader's batch totals
    pub fn stats(&self) -> Arc<LoadStats> {
        Arc::clone(&self.stats)
    }
}

impl Loader<i64> for DirectorLoader {
    type Value = DirectorRecord;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        let batch = self.stats.record(keys.len());
        tracing::debug!(batch, director_count = keys.len(), "Batch loading directors");

        let records = self.db.directors().find_by_ids(keys).await.map_err(Arc::new)?;
        Ok(records.into_iter().map(|r| (r.id, r)).collect())
    }
}

/// Batch-loads the movies of each director, keyed by director ID
pub struct DirectorMoviesLoader {
    db: Database,
}

impl DirectorMoviesLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<i64> for DirectorMoviesLoader {
    type Value = Vec<MovieRecord>;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        tracing::debug!(director_count = keys.len(), "Batch loading movies by director");

        let records = self
            .db
            .movies()
            .list_by_directors(keys)
            .await
            .map_err(Arc::new)?;

        // Every requested director gets an entry, even with no movies
        let mut result: HashMap<i64, Vec<MovieRecord>> =
            keys.iter().map(|k| (*k, Vec::new())).collect();
        for record in records {
            if let Some(director_id) = record.director_id
                && let Some(movies) = result.get_mut(&director_id)
            {
                movies.push(record);
            }
        }

        Ok(result)
    }
}
