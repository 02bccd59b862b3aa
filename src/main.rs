//! Movies API - GraphQL service over movies and directors
//!
//! All operations are exposed via GraphQL at /graphql.

use std::time::Duration;

use anyhow::Context;

use movies_api::cli::CliOptions;
use movies_api::config::Config;
use movies_api::db::Database;
use movies_api::graphql::{build_schema, schema_sdl};
use movies_api::{AppState, build_app, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliOptions::from_args();
    if cli.print_schema {
        println!("{}", schema_sdl());
        return Ok(());
    }

    // Load configuration first (before tracing, which depends on LOG_FORMAT)
    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;
    if let Some(port) = cli.port_override {
        config.port = port;
    }

    logging::init(config.log_format)?;
    tracing::info!("Starting movies API");

    let db = Database::connect_with_retry(
        &config.database_url,
        config.database_max_connections,
        Duration::from_secs(30),
    )
    .await?;
    tracing::info!("Database connected");

    let sync = db.sync_schema().await?;
    tracing::info!(tables_created = ?sync.tables_created, "Database schema synced");

    let schema = build_schema(db.clone());
    tracing::info!("GraphQL schema built");

    let app = build_app(AppState { db, schema });

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
