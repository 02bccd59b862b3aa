//! GraphQL schema definition with queries and mutations

use async_graphql::dataloader::DataLoader;
use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;

use super::loaders::{DirectorLoader, DirectorMoviesLoader};
use super::mutations::MovieMutations;
use super::queries::{DirectorQueries, MovieQueries};

/// The GraphQL schema type
pub type MoviesSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(MovieQueries, DirectorQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(MovieMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database) -> MoviesSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .extension(Tracing)
    .data(DataLoader::new(DirectorLoader::new(db.clone()), tokio::spawn))
    .data(DataLoader::new(DirectorMoviesLoader::new(db.clone()), tokio::spawn))
    .data(db)
    .finish()
}

/// Render the schema as SDL. Needs no database.
pub fn schema_sdl() -> String {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .finish()
    .sdl()
}
