//! Route strategies and their per-strategy constants.
//!
//! Each strategy carries its cruising speed, fuel burn, waypoint rule and
//! weather-risk policy in one place so the rest of the planner dispatches
//! on [`RouteStrategy`] instead of branching on strategy names.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::geo::GeoPoint;
use crate::models::{Port, RiskSeverity};
use crate::waypoints::{synthesize_course, CoursePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStrategy {
    /// Near-direct path, highest speed
    Fastest,
    /// Wide detour away from landmass and risk, never carries weather risks
    Safest,
    /// Lowest burn, opportunistically calls at intermediate ports
    Economical,
}

/// How a strategy shapes the interior of a course.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaypointRule {
    /// Symmetric lateral jitter of up to `jitter_fraction` of the route length.
    Direct { jitter_fraction: f64 },
    /// Lateral offset between the two fractions, always toward open sea.
    Seaward {
        min_fraction: f64,
        max_fraction: f64,
    },
    /// Symmetric jitter, with each point possibly replaced by a nearby port.
    PortThreading { jitter_fraction: f64 },
}

/// Bypass geometry used when a course has to round the peninsula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BypassRule {
    /// Degrees of longitude east of the cape.
    pub offset_deg: f64,
    /// Adds an outermost point at the band midpoint.
    pub wide_arc: bool,
    /// Calls at the closest port beyond the cape once it has been rounded.
    pub port_call_after_rounding: bool,
}

/// Number and severity range of weather-risk markers a strategy carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskPolicy {
    pub markers: usize,
    pub severities: &'static [RiskSeverity],
}

const ALL_SEVERITIES: &[RiskSeverity] = &[RiskSeverity::Low, RiskSeverity::Medium, RiskSeverity::High];
const MODERATE_SEVERITIES: &[RiskSeverity] = &[RiskSeverity::Low, RiskSeverity::Medium];

impl RouteStrategy {
    pub const ALL: [RouteStrategy; 3] = [
        RouteStrategy::Fastest,
        RouteStrategy::Safest,
        RouteStrategy::Economical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RouteStrategy::Fastest => "fastest",
            RouteStrategy::Safest => "safest",
            RouteStrategy::Economical => "economical",
        }
    }

    /// Cruising speed in knots.
    pub fn speed_knots(&self) -> f64 {
        match self {
            RouteStrategy::Fastest => 22.0,
            RouteStrategy::Safest => 18.0,
            RouteStrategy::Economical => 15.0,
        }
    }

    /// Fuel burn in tons per nautical mile.
    pub fn fuel_rate_per_nm(&self) -> f64 {
        match self {
            RouteStrategy::Fastest => 0.06,
            RouteStrategy::Safest => 0.055,
            RouteStrategy::Economical => 0.045,
        }
    }

    /// Interior waypoints generated on open water.
    pub fn target_waypoint_count(&self) -> usize {
        match self {
            RouteStrategy::Fastest => 3,
            RouteStrategy::Safest => 5,
            RouteStrategy::Economical => 4,
        }
    }

    pub fn waypoint_rule(&self) -> WaypointRule {
        match self {
            RouteStrategy::Fastest => WaypointRule::Direct {
                jitter_fraction: 0.02,
            },
            RouteStrategy::Safest => WaypointRule::Seaward {
                min_fraction: 0.03,
                max_fraction: 0.06,
            },
            RouteStrategy::Economical => WaypointRule::PortThreading {
                jitter_fraction: 0.03,
            },
        }
    }

    pub fn bypass_rule(&self) -> BypassRule {
        match self {
            RouteStrategy::Fastest => BypassRule {
                offset_deg: 0.3,
                wide_arc: false,
                port_call_after_rounding: false,
            },
            RouteStrategy::Safest => BypassRule {
                offset_deg: 1.2,
                wide_arc: true,
                port_call_after_rounding: false,
            },
            RouteStrategy::Economical => BypassRule {
                offset_deg: 0.6,
                wide_arc: false,
                port_call_after_rounding: true,
            },
        }
    }

    pub fn risk_policy(&self) -> RiskPolicy {
        match self {
            RouteStrategy::Fastest => RiskPolicy {
                markers: 2,
                severities: ALL_SEVERITIES,
            },
            RouteStrategy::Safest => RiskPolicy {
                markers: 0,
                severities: &[],
            },
            RouteStrategy::Economical => RiskPolicy {
                markers: 1,
                severities: MODERATE_SEVERITIES,
            },
        }
    }

    /// Synthesize the ordered course for this strategy.
    pub fn generate_waypoints<R: Rng + ?Sized>(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        ports: &[Port],
        config: &PlannerConfig,
        rng: &mut R,
    ) -> Vec<CoursePoint> {
        synthesize_course(*self, origin, destination, ports, config, rng)
    }
}

impl fmt::Display for RouteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RouteStrategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(RouteStrategy::Fastest),
            "safest" => Ok(RouteStrategy::Safest),
            "economical" => Ok(RouteStrategy::Economical),
            _ => Err(PlanError::InvalidStrategy(s.to_string())),
        }
    }
}
