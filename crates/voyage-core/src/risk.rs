//! Synthetic weather-risk overlay.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::geo::GeoPoint;
use crate::models::{RiskType, Waypoint, WeatherRisk};
use crate::strategy::RiskPolicy;

/// Place the markers a policy asks for near interior waypoints.
///
/// Each marker sits within `jitter_degrees` (per axis) of a randomly chosen
/// interior waypoint and inherits its pass time. Courses without interior
/// waypoints carry no markers.
pub fn generate_risks<R: Rng + ?Sized>(
    waypoints: &[Waypoint],
    policy: &RiskPolicy,
    jitter_degrees: f64,
    rng: &mut R,
) -> Vec<WeatherRisk> {
    if policy.markers == 0 || policy.severities.is_empty() || waypoints.len() < 3 {
        return Vec::new();
    }
    let interior = &waypoints[1..waypoints.len() - 1];
    let jitter = if jitter_degrees.is_finite() {
        jitter_degrees.abs()
    } else {
        0.0
    };

    let mut risks = Vec::with_capacity(policy.markers);
    for _ in 0..policy.markers {
        let (Some(anchor), Some(risk_type), Some(severity)) = (
            interior.choose(rng),
            RiskType::ALL.choose(rng),
            policy.severities.choose(rng),
        ) else {
            break;
        };
        let position = GeoPoint::new(
            anchor.position.longitude + rng.random_range(-1.0..=1.0) * jitter,
            anchor.position.latitude + rng.random_range(-1.0..=1.0) * jitter,
        );
        risks.push(WeatherRisk {
            position,
            risk_type: *risk_type,
            severity: *severity,
            estimated_time: anchor.estimated_pass_time,
        });
    }
    risks
}
