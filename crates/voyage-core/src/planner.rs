//! Route plan assembly.
//!
//! [`RoutePlanner`] resolves the request against the lookups, then runs
//! synthesis, scheduling, fuel and risk estimation in that order. Every
//! failure is detected before any geometry runs, so callers either get a
//! complete plan or an error.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::fuel::fuel_consumption_tons;
use crate::lookup::{PortLookup, ShipLookup};
use crate::models::{PlanRouteRequest, Port, RoutePlan, Ship};
use crate::risk::generate_risks;
use crate::schedule::estimate_schedule;
use crate::strategy::RouteStrategy;

/// Stateless plan builder over borrowed lookups.
///
/// Holds no mutable state; one planner can serve concurrent calls as long as
/// each call brings its own random source.
pub struct RoutePlanner<'a, P: ?Sized, S: ?Sized> {
    ports: &'a P,
    ships: &'a S,
    config: &'a PlannerConfig,
}

/// Everything a plan needs once ids and strategy have been resolved.
#[derive(Debug, Clone)]
struct ResolvedRequest {
    origin: Port,
    destination: Port,
    ship: Ship,
    strategy: RouteStrategy,
}

impl<'a, P, S> RoutePlanner<'a, P, S>
where
    P: PortLookup + ?Sized,
    S: ShipLookup + ?Sized,
{
    pub fn new(ports: &'a P, ships: &'a S, config: &'a PlannerConfig) -> Self {
        Self {
            ports,
            ships,
            config,
        }
    }

    /// Build a plan departing 24 hours from now.
    pub fn build<R: Rng + ?Sized>(
        &self,
        origin_port_id: &str,
        destination_port_id: &str,
        ship_id: &str,
        strategy: &str,
        rng: &mut R,
    ) -> Result<RoutePlan, PlanError> {
        let request = PlanRouteRequest {
            origin_port_id: origin_port_id.to_string(),
            destination_port_id: destination_port_id.to_string(),
            ship_id: ship_id.to_string(),
            strategy: strategy.to_string(),
            seed: None,
        };
        self.build_at(&request, Utc::now(), rng)
    }

    /// Build a plan as if requested at `planned_at`.
    ///
    /// The request's `seed` is ignored here; seeding is the caller's choice
    /// of `rng`.
    pub fn build_at<R: Rng + ?Sized>(
        &self,
        request: &PlanRouteRequest,
        planned_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<RoutePlan, PlanError> {
        let resolved = self.resolve(request)?;
        let plan = self.assemble(resolved, planned_at, rng);
        tracing::debug!(
            plan_id = %plan.id,
            strategy = %plan.strategy,
            waypoints = plan.waypoints.len(),
            distance_nm = plan.distance_nautical_miles,
            fuel_t = plan.fuel_consumption_tons,
            risks = plan.weather_risks.len(),
            "route plan built"
        );
        Ok(plan)
    }

    fn resolve(&self, request: &PlanRouteRequest) -> Result<ResolvedRequest, PlanError> {
        let strategy: RouteStrategy = request.strategy.parse()?;
        let origin = self.ports.port(&request.origin_port_id)?;
        let destination = self.ports.port(&request.destination_port_id)?;
        let ship = self.ships.ship(&request.ship_id)?;
        Ok(ResolvedRequest {
            origin,
            destination,
            ship,
            strategy,
        })
    }

    fn assemble<R: Rng + ?Sized>(
        &self,
        resolved: ResolvedRequest,
        planned_at: DateTime<Utc>,
        rng: &mut R,
    ) -> RoutePlan {
        let ResolvedRequest {
            origin,
            destination,
            ship,
            strategy,
        } = resolved;

        let port_index = self.ports.ports();
        let course = strategy.generate_waypoints(
            origin.position,
            destination.position,
            &port_index,
            self.config,
            rng,
        );
        let schedule = estimate_schedule(course, strategy.speed_knots(), planned_at);

        let distance_nautical_miles = round_distance(schedule.total_distance_nm);
        let fuel_consumption_tons =
            fuel_consumption_tons(distance_nautical_miles as f64, strategy);
        let weather_risks = generate_risks(
            &schedule.waypoints,
            &strategy.risk_policy(),
            self.config.risk_jitter_degrees,
            rng,
        );

        let id = format!(
            "RP-{}-{:06X}",
            schedule.departure_time.format("%Y%m%d"),
            rng.random_range(0..0x100_0000u32)
        );

        let repositioned_ship = Ship {
            position: origin.position,
            ..ship
        };

        RoutePlan {
            id,
            ship_id: repositioned_ship.id.clone(),
            origin_port: origin,
            destination_port: destination,
            strategy,
            departure_time: schedule.departure_time,
            estimated_arrival: schedule.estimated_arrival,
            waypoints: schedule.waypoints,
            distance_nautical_miles,
            fuel_consumption_tons,
            weather_risks,
            repositioned_ship,
        }
    }
}

fn round_distance(distance_nm: f64) -> u32 {
    if distance_nm.is_finite() && distance_nm > 0.0 {
        distance_nm.round() as u32
    } else {
        0
    }
}
