//! Core data models for route planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fuel::fuel_consumption_tons;
use crate::geo::{path_length_nm, GeoPoint};
use crate::strategy::RouteStrategy;

/// Lifecycle status of a waypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointStatus {
    /// Already passed; only set by live tracking, never by the planner
    Passed,
    /// Not yet reached
    #[default]
    Upcoming,
    /// Where the ship is at plan creation (the origin)
    Current,
}

/// An ordered point along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: GeoPoint,
    pub estimated_pass_time: DateTime<Utc>,
    pub status: WaypointStatus,
    /// Port id when the waypoint is an intermediate port call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_call: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    Storm,
    HighWaves,
    Fog,
    Ice,
}

impl RiskType {
    pub const ALL: &'static [RiskType] = &[
        RiskType::Storm,
        RiskType::HighWaves,
        RiskType::Fog,
        RiskType::Ice,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
}

/// Synthetic weather hazard marker attached to a route for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRisk {
    pub position: GeoPoint,
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub severity: RiskSeverity,
    pub estimated_time: DateTime<Utc>,
}

/// A port as resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub name: String,
    pub country: String,
    pub position: GeoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipType {
    Container,
    Bulk,
    Tanker,
    GeneralCargo,
    Roro,
}

/// A ship as resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: String,
    pub name: String,
    pub ship_type: ShipType,
    pub position: GeoPoint,
}

/// A planning request as accepted by the service surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRouteRequest {
    pub origin_port_id: String,
    pub destination_port_id: String,
    pub ship_id: String,
    pub strategy: String,
    /// Seed for the request-scoped random source. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A complete, immutable route plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub id: String,
    pub ship_id: String,
    pub origin_port: Port,
    pub destination_port: Port,
    pub strategy: RouteStrategy,
    pub departure_time: DateTime<Utc>,
    pub estimated_arrival: DateTime<Utc>,
    pub waypoints: Vec<Waypoint>,
    pub distance_nautical_miles: u32,
    pub fuel_consumption_tons: u32,
    pub weather_risks: Vec<WeatherRisk>,
    /// Copy of the ship placed at the origin port. The catalog record is untouched.
    pub repositioned_ship: Ship,
}

/// Allowed slack between the reported arrival and the rounded-distance ETA.
const ARRIVAL_TOLERANCE_MS: i64 = 60_000;

impl RoutePlan {
    pub fn positions(&self) -> Vec<GeoPoint> {
        self.waypoints.iter().map(|wp| wp.position).collect()
    }

    /// Check the plan's internal consistency.
    /// Returns list of violations (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.waypoints.len() < 2 {
            errors.push(format!(
                "plan must have at least 2 waypoints, got {}",
                self.waypoints.len()
            ));
            return errors;
        }

        if self
            .waypoints
            .windows(2)
            .any(|pair| pair[1].estimated_pass_time < pair[0].estimated_pass_time)
        {
            errors.push("waypoints are not ordered by estimated pass time".to_string());
        }

        let first = &self.waypoints[0];
        let last = &self.waypoints[self.waypoints.len() - 1];
        if first.position != self.origin_port.position {
            errors.push("first waypoint does not match origin port".to_string());
        }
        if last.position != self.destination_port.position {
            errors.push("last waypoint does not match destination port".to_string());
        }

        let current = self
            .waypoints
            .iter()
            .filter(|wp| wp.status == WaypointStatus::Current)
            .count();
        if current != 1 || first.status != WaypointStatus::Current {
            errors.push("origin must be the only current waypoint".to_string());
        }
        if self.waypoints[1..]
            .iter()
            .any(|wp| wp.status != WaypointStatus::Upcoming)
        {
            errors.push("all waypoints after the origin must be upcoming".to_string());
        }

        let measured = path_length_nm(&self.positions()).round() as u32;
        if measured != self.distance_nautical_miles {
            errors.push(format!(
                "distance {} nm does not match waypoint path {} nm",
                self.distance_nautical_miles, measured
            ));
        }

        let expected_fuel = fuel_consumption_tons(self.distance_nautical_miles as f64, self.strategy);
        if expected_fuel != self.fuel_consumption_tons {
            errors.push(format!(
                "fuel {} t does not match expected {} t",
                self.fuel_consumption_tons, expected_fuel
            ));
        }

        let expected_hours =
            self.distance_nautical_miles as f64 / self.strategy.speed_knots();
        let expected_arrival =
            self.departure_time + chrono::Duration::milliseconds((expected_hours * 3_600_000.0).round() as i64);
        let slack = (self.estimated_arrival - expected_arrival).num_milliseconds().abs();
        let rounding_slack = (0.5 / self.strategy.speed_knots() * 3_600_000.0) as i64;
        if slack > rounding_slack + ARRIVAL_TOLERANCE_MS {
            errors.push(format!(
                "estimated arrival is {} ms away from distance/speed ETA",
                slack
            ));
        }
        if last.estimated_pass_time != self.estimated_arrival {
            errors.push("estimated arrival does not match last waypoint".to_string());
        }
        if first.estimated_pass_time != self.departure_time {
            errors.push("origin pass time does not match departure".to_string());
        }

        let policy = self.strategy.risk_policy();
        // Markers anchor on interior waypoints only.
        let expected_risks = if self.waypoints.len() > 2 {
            policy.markers
        } else {
            0
        };
        if self.weather_risks.len() != expected_risks {
            errors.push(format!(
                "{} weather risks, expected {} for {}",
                self.weather_risks.len(),
                expected_risks,
                self.strategy
            ));
        }
        if self
            .weather_risks
            .iter()
            .any(|risk| !policy.severities.contains(&risk.severity))
        {
            errors.push(format!("weather risk severity not allowed for {}", self.strategy));
        }

        if self.repositioned_ship.position != self.origin_port.position {
            errors.push("repositioned ship is not at the origin port".to_string());
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
