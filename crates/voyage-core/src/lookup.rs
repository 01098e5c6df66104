//! Read-only port and ship resolution consumed by the planner.

use crate::error::PlanError;
use crate::models::{Port, Ship};

/// Resolves ports by id and exposes the port index used for port calls.
pub trait PortLookup {
    fn find_port(&self, port_id: &str) -> Option<Port>;

    /// Every known port.
    fn ports(&self) -> Vec<Port>;

    fn port(&self, port_id: &str) -> Result<Port, PlanError> {
        self.find_port(port_id)
            .ok_or_else(|| PlanError::PortNotFound(port_id.to_string()))
    }
}

/// Resolves ships by id.
pub trait ShipLookup {
    fn find_ship(&self, ship_id: &str) -> Option<Ship>;

    fn ship(&self, ship_id: &str) -> Result<Ship, PlanError> {
        self.find_ship(ship_id)
            .ok_or_else(|| PlanError::ShipNotFound(ship_id.to_string()))
    }
}
