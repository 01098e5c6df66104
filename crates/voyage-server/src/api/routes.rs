//! REST API routes.

use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::api::{catalog, plans};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/routes/plan", post(plans::plan_route))
        .route("/v1/strategies", get(plans::list_strategies))
        .route("/v1/ports", get(catalog::list_ports))
        .route("/v1/ports/:port_id", get(catalog::get_port))
        .route("/v1/ships", get(catalog::list_ships))
        .route("/v1/ships/:ship_id", get(catalog::get_ship))
}
