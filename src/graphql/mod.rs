//! GraphQL API over movies and directors
//!
//! Queries and mutations live in per-domain `queries/` and `mutations/` modules,
//! each a `#[derive(Default)]` struct with an `#[Object]` impl, merged into
//! `QueryRoot`/`MutationRoot` in `schema.rs`.
//!
//! Not-found handling is deliberately asymmetric: the `movie` query answers
//! `null` for a missing movie, while `updateMovie`/`deleteMovie` fail with a
//! `NOT_FOUND` error.

pub mod error;
pub mod helpers;
pub mod loaders;
pub mod mutations;
pub mod queries;
mod schema;
pub mod service;
pub mod types;

pub use error::ApiError;
pub use schema::{MoviesSchema, MutationRoot, QueryRoot, build_schema, schema_sdl};
pub use types::{Director, Movie};
