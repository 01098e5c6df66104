//! Voyage Server - HTTP front end for the maritime route planner

use anyhow::Result;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voyage_server::api;
use voyage_server::config::Config;
use voyage_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("voyage_server=debug".parse()?)
            .add_directive("voyage_core=info".parse()?))
        .init();

    tracing::info!("Starting Voyage Server...");

    let state = Arc::new(AppState::new(Config::from_env())?);
    let port = state.config().server_port;
    tracing::info!(
        "Catalog ready: {} ports, {} ships",
        state.catalog().port_count(),
        state.catalog().ships().len()
    );

    let app = api::routes()
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
