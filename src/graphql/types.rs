//! GraphQL object types and mutation payloads

use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, ID, Result, SimpleObject};

use super::helpers::{director_record_to_graphql, movie_age, movie_record_to_graphql};
use super::loaders::{DirectorLoader, DirectorMoviesLoader};

// ============================================================================
// Entities
// ============================================================================

/// A movie in the catalogue
#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "MovieType", complex)]
pub struct Movie {
    pub id: ID,
    pub title: String,
    pub year: i32,
    #[graphql(skip)]
    pub record_id: i64,
    #[graphql(skip)]
    pub director_id: Option<i64>,
}

#[ComplexObject]
impl Movie {
    /// Director of the movie, if one has been assigned
    async fn director(&self, ctx: &Context<'_>) -> Result<Option<Director>> {
        let Some(director_id) = self.director_id else {
            return Ok(None);
        };

        let loader = ctx.data::<DataLoader<DirectorLoader>>()?;
        let record = loader
            .load_one(director_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(record.map(director_record_to_graphql))
    }

    /// "Old movie" for releases before 2000, "New movie" otherwise
    async fn movie_age(&self) -> String {
        movie_age(self.year).to_string()
    }
}

/// A movie director
#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "DirectorType", complex)]
pub struct Director {
    pub id: ID,
    pub name: String,
    pub surname: String,
    #[graphql(skip)]
    pub record_id: i64,
}

#[ComplexObject]
impl Director {
    /// Movies that reference this director
    async fn movie_set(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let loader = ctx.data::<DataLoader<DirectorMoviesLoader>>()?;
        let records = loader
            .load_one(self.record_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .unwrap_or_default();

        Ok(records.into_iter().map(movie_record_to_graphql).collect())
    }
}

// ============================================================================
// Mutation payloads
// ============================================================================

#[derive(SimpleObject, Debug)]
#[graphql(name = "MovieCreateMutation")]
pub struct MovieCreatePayload {
    pub movie: Option<Movie>,
}

#[derive(SimpleObject, Debug)]
#[graphql(name = "MovieUpdateMutation")]
pub struct MovieUpdatePayload {
    pub movie: Option<Movie>,
}

/// Deletion only confirms success; the deleted movie is never echoed back.
#[derive(SimpleObject, Debug)]
#[graphql(name = "MovieDeleteMutation")]
pub struct MovieDeletePayload {
    pub movie: Option<Movie>,
    pub success: Option<bool>,
}
