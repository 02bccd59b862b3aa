//! Movies API - GraphQL service over a catalogue of movies and their directors
//!
//! All operations are exposed via GraphQL at /graphql. The binary in `main.rs`
//! wires configuration, logging and the database together; everything else lives
//! in this library so integration tests can build the same schema and router.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod graphql;
pub mod logging;

pub use app::{AppState, build_app};
