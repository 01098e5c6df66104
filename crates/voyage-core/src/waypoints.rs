//! Waypoint synthesis.
//!
//! Builds the ordered course between two ports for a strategy. Courses that
//! straddle the configured peninsula round its cape on the seaward side;
//! everything else is interpolated across open water with strategy-scaled
//! lateral jitter, optionally threading through nearby ports.

use rand::Rng;

use crate::config::PlannerConfig;
use crate::geo::{bearing_deg, distance_nm, heading_difference, lerp, offset, GeoPoint};
use crate::models::{Port, WaypointStatus};
use crate::strategy::{BypassRule, RouteStrategy, WaypointRule};

/// A synthesized course point, before it is scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct CoursePoint {
    pub position: GeoPoint,
    pub status: WaypointStatus,
    pub port_call: Option<String>,
}

impl CoursePoint {
    fn current(position: GeoPoint) -> Self {
        Self {
            position,
            status: WaypointStatus::Current,
            port_call: None,
        }
    }

    fn upcoming(position: GeoPoint) -> Self {
        Self {
            position,
            status: WaypointStatus::Upcoming,
            port_call: None,
        }
    }

    fn port_call(port: &Port) -> Self {
        Self {
            position: port.position,
            status: WaypointStatus::Upcoming,
            port_call: Some(port.id.clone()),
        }
    }
}

/// Synthesize the ordered course from `origin` to `destination`.
///
/// The first point is always `origin` with status `current`, the last is
/// always `destination`; everything in between is `upcoming`. Coincident
/// endpoints yield the two-point degenerate course.
pub fn synthesize_course<R: Rng + ?Sized>(
    strategy: RouteStrategy,
    origin: GeoPoint,
    destination: GeoPoint,
    ports: &[Port],
    config: &PlannerConfig,
    rng: &mut R,
) -> Vec<CoursePoint> {
    let mut course = vec![CoursePoint::current(origin)];

    if distance_nm(origin, destination) <= f64::EPSILON {
        course.push(CoursePoint::upcoming(destination));
        return course;
    }

    let interior = if config.peninsula.is_straddled_by(origin, destination) {
        bypass_points(strategy.bypass_rule(), origin, destination, ports, config)
    } else {
        open_water_points(strategy, origin, destination, ports, config, rng)
    };

    course.extend(interior);
    course.push(CoursePoint::upcoming(destination));
    course
}

/// Points that round the cape east of the peninsula, in travel order.
///
/// Bypass points always sit east of the cape. A port call, when the rule asks
/// for one, is taken north of the rounding point so the course never cuts
/// back across the peninsula.
fn bypass_points(
    rule: BypassRule,
    origin: GeoPoint,
    destination: GeoPoint,
    ports: &[Port],
    config: &PlannerConfig,
) -> Vec<CoursePoint> {
    let band = &config.peninsula;
    let longitude = band.cape.longitude + rule.offset_deg;
    let rounding_latitude = band.cape.latitude.max(band.north_latitude);
    let rounding = GeoPoint::new(longitude, rounding_latitude);

    let mut points = vec![CoursePoint::upcoming(GeoPoint::new(
        longitude,
        band.south_latitude,
    ))];
    if rule.wide_arc {
        points.push(CoursePoint::upcoming(GeoPoint::new(
            longitude + rule.offset_deg * 0.5,
            (band.south_latitude + rounding_latitude) / 2.0,
        )));
    }
    points.push(CoursePoint::upcoming(rounding));

    if rule.port_call_after_rounding {
        let beyond_cape: Vec<Port> = ports
            .iter()
            .filter(|port| port.position.latitude >= rounding_latitude)
            .cloned()
            .collect();
        let candidate = nearest_port(
            rounding,
            &beyond_cape,
            config.port_call_radius_nm,
            &[origin, destination],
            &[],
        );
        if let Some(port) = candidate {
            points.push(CoursePoint::port_call(port));
        }
    }

    if origin.latitude > destination.latitude {
        points.reverse();
    }
    points
}

/// Interpolated interior points with strategy-specific lateral displacement.
fn open_water_points<R: Rng + ?Sized>(
    strategy: RouteStrategy,
    origin: GeoPoint,
    destination: GeoPoint,
    ports: &[Port],
    config: &PlannerConfig,
    rng: &mut R,
) -> Vec<CoursePoint> {
    let count = strategy.target_waypoint_count();
    let route_nm = distance_nm(origin, destination);
    let course_bearing = bearing_deg(origin, destination);
    let mut visited: Vec<&str> = Vec::new();
    let mut points = Vec::with_capacity(count);

    for i in 1..=count {
        let t = i as f64 / (count + 1) as f64;
        let base = lerp(origin, destination, t);

        let point = match strategy.waypoint_rule() {
            WaypointRule::Direct { jitter_fraction } => CoursePoint::upcoming(lateral_jitter(
                base,
                course_bearing,
                jitter_fraction * route_nm,
                rng,
            )),
            WaypointRule::Seaward {
                min_fraction,
                max_fraction,
            } => {
                let side = seaward_side(course_bearing, config.seaward_heading_deg);
                let magnitude = rng.random_range(min_fraction..=max_fraction) * route_nm;
                CoursePoint::upcoming(offset(base, magnitude, side))
            }
            WaypointRule::PortThreading { jitter_fraction } => {
                let calls_port = rng.random_bool(config.port_call_probability());
                let port = if calls_port {
                    nearest_port(
                        base,
                        ports,
                        config.port_call_radius_nm,
                        &[origin, destination],
                        &visited,
                    )
                } else {
                    None
                };
                match port {
                    Some(port) => {
                        visited.push(port.id.as_str());
                        CoursePoint::port_call(port)
                    }
                    None => CoursePoint::upcoming(lateral_jitter(
                        base,
                        course_bearing,
                        jitter_fraction * route_nm,
                        rng,
                    )),
                }
            }
        };
        points.push(point);
    }

    points
}

/// Displace `point` perpendicular to the course by up to `max_nm` either side.
fn lateral_jitter<R: Rng + ?Sized>(
    point: GeoPoint,
    course_bearing: f64,
    max_nm: f64,
    rng: &mut R,
) -> GeoPoint {
    let amount = rng.random_range(-1.0..=1.0) * max_nm;
    offset(point, amount, course_bearing + 90.0)
}

/// The perpendicular to the course that faces open sea.
fn seaward_side(course_bearing: f64, seaward_heading: f64) -> f64 {
    let starboard = (course_bearing + 90.0).rem_euclid(360.0);
    let port = (course_bearing - 90.0).rem_euclid(360.0);
    if heading_difference(starboard, seaward_heading) <= heading_difference(port, seaward_heading) {
        starboard
    } else {
        port
    }
}

/// Closest port within `radius_nm`, skipping route endpoints and ports already called at.
fn nearest_port<'p>(
    point: GeoPoint,
    ports: &'p [Port],
    radius_nm: f64,
    endpoints: &[GeoPoint],
    visited: &[&str],
) -> Option<&'p Port> {
    ports
        .iter()
        .filter(|port| !endpoints.contains(&port.position))
        .filter(|port| !visited.contains(&port.id.as_str()))
        .map(|port| (port, distance_nm(point, port.position)))
        .filter(|(_, dist)| *dist <= radius_nm)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(port, _)| port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::lookup::PortLookup;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn position(catalog: &Catalog, id: &str) -> GeoPoint {
        catalog.find_port(id).unwrap().position
    }

    fn course(strategy: RouteStrategy, from: &str, to: &str, seed: u64) -> Vec<CoursePoint> {
        let catalog = Catalog::seeded();
        let mut rng = StdRng::seed_from_u64(seed);
        synthesize_course(
            strategy,
            position(&catalog, from),
            position(&catalog, to),
            &catalog.ports(),
            &PlannerConfig::default(),
            &mut rng,
        )
    }

    #[test]
    fn open_water_uses_target_count_per_strategy() {
        for strategy in RouteStrategy::ALL {
            let points = course(strategy, "CNSHA", "CNTAO", 7);
            assert_eq!(points.len(), strategy.target_waypoint_count() + 2, "{strategy}");
        }
    }

    #[test]
    fn endpoints_are_exact_and_statuses_follow_lifecycle() {
        let catalog = Catalog::seeded();
        for strategy in RouteStrategy::ALL {
            let points = course(strategy, "CNSHA", "CNDLC", 11);
            assert_eq!(points[0].position, position(&catalog, "CNSHA"));
            assert_eq!(points.last().unwrap().position, position(&catalog, "CNDLC"));
            assert_eq!(points[0].status, WaypointStatus::Current);
            assert!(points[1..].iter().all(|p| p.status == WaypointStatus::Upcoming));
        }
    }

    #[test]
    fn peninsula_bypass_rounds_east_of_cape() {
        let cape = PlannerConfig::default().peninsula.cape;
        let fastest = course(RouteStrategy::Fastest, "CNSHA", "CNDLC", 1);
        let safest = course(RouteStrategy::Safest, "CNSHA", "CNDLC", 1);

        assert_eq!(fastest.len(), 4);
        assert_eq!(safest.len(), 5);

        let east_most = |points: &[CoursePoint]| {
            points[1..points.len() - 1]
                .iter()
                .map(|p| p.position.longitude)
                .fold(f64::MIN, f64::max)
        };
        assert!(east_most(&fastest) > cape.longitude);
        assert!(east_most(&safest) > east_most(&fastest));
    }

    #[test]
    fn bypass_points_follow_travel_direction() {
        let northbound = course(RouteStrategy::Safest, "CNSHA", "CNDLC", 3);
        let southbound = course(RouteStrategy::Safest, "CNDLC", "CNSHA", 3);
        let lats = |points: &[CoursePoint]| -> Vec<f64> {
            points[1..points.len() - 1].iter().map(|p| p.position.latitude).collect()
        };
        assert!(lats(&northbound).windows(2).all(|w| w[0] <= w[1]));
        assert!(lats(&southbound).windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn economical_bypass_passes_near_a_known_port() {
        let cape = PlannerConfig::default().peninsula.cape;
        let points = course(RouteStrategy::Economical, "CNSHA", "CNDLC", 5);
        let call = points
            .iter()
            .position(|p| p.port_call.as_deref() == Some("CNWEI"))
            .expect("calls at Weihai");
        // The call comes once the cape is behind the ship.
        assert!(points[call - 1].position.longitude > cape.longitude);
        assert!(points[call - 1].position.latitude >= cape.latitude);

        let southbound = course(RouteStrategy::Economical, "CNDLC", "CNSHA", 5);
        assert_eq!(southbound[1].port_call.as_deref(), Some("CNWEI"));
    }

    #[test]
    fn courses_east_of_the_cape_stay_in_open_water() {
        for strategy in RouteStrategy::ALL {
            let points = course(strategy, "CNSHA", "KRINC", 2);
            assert_eq!(points.len(), strategy.target_waypoint_count() + 2, "{strategy}");
        }
    }

    #[test]
    fn bypass_legs_cross_cape_latitude_seaward() {
        let cape = PlannerConfig::default().peninsula.cape;
        let routes = [
            ("CNSHA", "CNDLC"),
            ("CNDLC", "CNSHA"),
            ("CNLYG", "CNYNT"),
            ("CNNGB", "CNTSN"),
            ("CNTSN", "CNXMN"),
        ];
        for (from, to) in routes {
            for strategy in RouteStrategy::ALL {
                for seed in 0..5 {
                    let points = course(strategy, from, to, seed);
                    for leg in points.windows(2) {
                        let (a, b) = (leg[0].position, leg[1].position);
                        if a.latitude == b.latitude
                            || (a.latitude - cape.latitude) * (b.latitude - cape.latitude) > 0.0
                        {
                            continue;
                        }
                        let t = (cape.latitude - a.latitude) / (b.latitude - a.latitude);
                        let crossing = a.longitude + t * (b.longitude - a.longitude);
                        assert!(
                            crossing > cape.longitude,
                            "{from}->{to} {strategy} crosses cape latitude at {crossing:.3}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn economical_port_calls_when_probability_is_certain() {
        let catalog = Catalog::seeded();
        let mut config = PlannerConfig::default();
        config.port_call_probability = 1.0;
        let mut rng = StdRng::seed_from_u64(99);
        let points = synthesize_course(
            RouteStrategy::Economical,
            position(&catalog, "CNSHA"),
            position(&catalog, "CNTAO"),
            &catalog.ports(),
            &config,
            &mut rng,
        );
        let calls: Vec<_> = points.iter().filter_map(|p| p.port_call.clone()).collect();
        assert!(calls.contains(&"CNRZH".to_string()), "calls: {calls:?}");
        let unique: HashSet<&String> = calls.iter().collect();
        assert_eq!(unique.len(), calls.len(), "calls: {calls:?}");
    }

    #[test]
    fn economical_never_calls_when_probability_is_zero() {
        let catalog = Catalog::seeded();
        let mut config = PlannerConfig::default();
        config.port_call_probability = 0.0;
        let mut rng = StdRng::seed_from_u64(99);
        let points = synthesize_course(
            RouteStrategy::Economical,
            position(&catalog, "CNSHA"),
            position(&catalog, "CNTAO"),
            &catalog.ports(),
            &config,
            &mut rng,
        );
        assert!(points.iter().all(|p| p.port_call.is_none()));
    }

    #[test]
    fn safest_open_water_leans_seaward() {
        let catalog = Catalog::seeded();
        let origin = position(&catalog, "CNSHA");
        let destination = position(&catalog, "CNTAO");
        let points = course(RouteStrategy::Safest, "CNSHA", "CNTAO", 21);
        let count = points.len() - 2;
        for (i, point) in points[1..=count].iter().enumerate() {
            let base = lerp(origin, destination, (i + 1) as f64 / (count + 1) as f64);
            assert!(point.position.longitude > base.longitude);
        }
    }

    #[test]
    fn coincident_endpoints_give_two_points() {
        let points = course(RouteStrategy::Fastest, "CNSHA", "CNSHA", 0);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, points[1].position);
    }

    #[test]
    fn same_seed_same_course() {
        let a = course(RouteStrategy::Economical, "CNSHA", "CNTAO", 42);
        let b = course(RouteStrategy::Economical, "CNSHA", "CNTAO", 42);
        assert_eq!(a, b);
    }
}
