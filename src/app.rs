//! Application state and HTTP router construction.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::graphql::MoviesSchema;

/// Shared state for HTTP handlers (GraphQL, health).
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub schema: MoviesSchema,
}

/// Build the full Axum router: health probes, /graphql and layers.
/// Returns Router<()> (state fully applied) for use with axum::serve.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(crate::api::health::router())
        .merge(crate::graphql::service::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
