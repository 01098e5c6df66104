//! API routes for the route planning server.

pub mod catalog;
pub mod plans;
pub mod request_id;
mod routes;

use axum::{middleware, Router};

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router().layer(middleware::from_fn(request_id::ensure_request_id))
}

#[cfg(test)]
mod tests;
