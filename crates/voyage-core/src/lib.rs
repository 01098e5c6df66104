pub mod catalog;
pub mod config;
pub mod error;
pub mod fuel;
pub mod geo;
pub mod lookup;
pub mod models;
pub mod planner;
pub mod risk;
pub mod schedule;
pub mod strategy;
pub mod waypoints;

pub use catalog::Catalog;
pub use config::{PeninsulaBand, PlannerConfig, DEPARTURE_OFFSET_HOURS};
pub use error::PlanError;
pub use fuel::fuel_consumption_tons;
pub use geo::{distance_nm, GeoPoint};
pub use lookup::{PortLookup, ShipLookup};
pub use models::{
    PlanRouteRequest, Port, RiskSeverity, RiskType, RoutePlan, Ship, ShipType, Waypoint,
    WaypointStatus, WeatherRisk,
};
pub use planner::RoutePlanner;
pub use risk::generate_risks;
pub use schedule::{estimate_schedule, Schedule};
pub use strategy::{RiskPolicy, RouteStrategy, WaypointRule};
pub use waypoints::{synthesize_course, CoursePoint};
