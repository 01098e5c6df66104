//! Errors surfaced by the route planner.

use thiserror::Error;

/// Reasons a plan request is rejected. All are detected before any geometry runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("port not found: {0}")]
    PortNotFound(String),
    #[error("ship not found: {0}")]
    ShipNotFound(String),
    #[error("invalid strategy: {0:?} (expected fastest, safest or economical)")]
    InvalidStrategy(String),
}

impl PlanError {
    /// Stable snake_case tag for API payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::PortNotFound(_) => "port_not_found",
            PlanError::ShipNotFound(_) => "ship_not_found",
            PlanError::InvalidStrategy(_) => "invalid_strategy",
        }
    }
}
