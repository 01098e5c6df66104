//! Route planning endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use voyage_core::{PlanError, PlanRouteRequest, RiskSeverity, RoutePlan, RouteStrategy};

use crate::api::request_id::RequestId;
use crate::state::AppState;

/// Errors returned by the planning API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("planner task failed: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::Plan(err @ (PlanError::PortNotFound(_) | PlanError::ShipNotFound(_))) => {
                (StatusCode::NOT_FOUND, err.kind())
            }
            ApiError::Plan(err @ PlanError::InvalidStrategy(_)) => (StatusCode::BAD_REQUEST, err.kind()),
            ApiError::Body(rejection) => (rejection.status(), "invalid_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        (
            status,
            Json(json!({
                "error": self.to_string(),
                "kind": kind,
            })),
        )
            .into_response()
    }
}

/// Plan a route between two catalog ports.
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    body: Result<Json<PlanRouteRequest>, JsonRejection>,
) -> Result<Json<RoutePlan>, ApiError> {
    let request_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();
    let Json(request) = body.inspect_err(|rejection| {
        tracing::warn!(%request_id, "Rejected plan request body: {}", rejection.body_text());
    })?;
    tracing::info!(
        %request_id,
        origin = %request.origin_port_id,
        destination = %request.destination_port_id,
        ship = %request.ship_id,
        strategy = %request.strategy,
        "Planning route"
    );

    let worker_state = state.clone();
    let worker_request = request.clone();
    let outcome = tokio::task::spawn_blocking(move || worker_state.plan_route(&worker_request))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    match outcome {
        Ok(plan) => {
            tracing::info!(
                %request_id,
                plan_id = %plan.id,
                distance_nm = plan.distance_nautical_miles,
                fuel_t = plan.fuel_consumption_tons,
                eta = %plan.estimated_arrival,
                "Route planned"
            );
            Ok(Json(plan))
        }
        Err(err) => {
            tracing::warn!(%request_id, kind = err.kind(), "Route plan rejected: {}", err);
            Err(err.into())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StrategyProfile {
    pub name: RouteStrategy,
    pub speed_knots: f64,
    pub fuel_rate_per_nm: f64,
    pub target_waypoint_count: usize,
    pub risk_markers: usize,
    pub risk_severities: Vec<RiskSeverity>,
}

impl From<RouteStrategy> for StrategyProfile {
    fn from(strategy: RouteStrategy) -> Self {
        let policy = strategy.risk_policy();
        Self {
            name: strategy,
            speed_knots: strategy.speed_knots(),
            fuel_rate_per_nm: strategy.fuel_rate_per_nm(),
            target_waypoint_count: strategy.target_waypoint_count(),
            risk_markers: policy.markers,
            risk_severities: policy.severities.to_vec(),
        }
    }
}

/// List the strategy table.
pub async fn list_strategies() -> Json<Vec<StrategyProfile>> {
    Json(RouteStrategy::ALL.into_iter().map(StrategyProfile::from).collect())
}
