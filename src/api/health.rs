//! Liveness and readiness probes
//!
//! `/readyz` only reports ready once the database answers and both the
//! `directors` and `movies` tables exist.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub database: bool,
    pub schema: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_tables: Vec<&'static str>,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn readyz(State(state): State<AppState>) -> Json<ReadyResponse> {
    let database = sqlx::query("SELECT 1")
        .fetch_one(state.db.pool())
        .await
        .is_ok();

    let missing_tables = if database {
        match state.db.missing_tables().await {
            Ok(missing) => missing,
            Err(e) => {
                tracing::warn!(error = %e, "Readiness probe could not inspect schema");
                vec!["directors", "movies"]
            }
        }
    } else {
        tracing::warn!("Readiness probe failed: database unreachable");
        Vec::new()
    };

    let schema = database && missing_tables.is_empty();
    if database && !schema {
        tracing::warn!(?missing_tables, "Readiness probe failed: schema not synced");
    }

    Json(ReadyResponse {
        ready: schema,
        database,
        schema,
        missing_tables,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
