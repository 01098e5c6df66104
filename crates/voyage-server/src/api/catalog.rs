//! Read-only catalog endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use voyage_core::{Port, PortLookup, Ship, ShipLookup};

use crate::state::AppState;

/// List all ports.
pub async fn list_ports(State(state): State<Arc<AppState>>) -> Json<Vec<Port>> {
    Json(state.catalog().ports())
}

/// Get a specific port by ID.
pub async fn get_port(
    State(state): State<Arc<AppState>>,
    Path(port_id): Path<String>,
) -> Result<Json<Port>, StatusCode> {
    state
        .catalog()
        .find_port(&port_id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// List all ships.
pub async fn list_ships(State(state): State<Arc<AppState>>) -> Json<Vec<Ship>> {
    Json(state.catalog().ships().to_vec())
}

/// Get a specific ship by ID.
pub async fn get_ship(
    State(state): State<Arc<AppState>>,
    Path(ship_id): Path<String>,
) -> Result<Json<Ship>, StatusCode> {
    state
        .catalog()
        .find_ship(&ship_id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
