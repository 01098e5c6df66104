//! ETA scheduling along a synthesized course.

use chrono::{DateTime, Duration, Utc};

use crate::config::DEPARTURE_OFFSET_HOURS;
use crate::geo::distance_nm;
use crate::models::Waypoint;
use crate::waypoints::CoursePoint;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Timed course produced by [`estimate_schedule`].
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub departure_time: DateTime<Utc>,
    pub estimated_arrival: DateTime<Utc>,
    pub waypoints: Vec<Waypoint>,
    /// Unrounded great-circle length of the course
    pub total_distance_nm: f64,
}

/// Departure for a plan created at `planned_at`.
pub fn departure_for(planned_at: DateTime<Utc>) -> DateTime<Utc> {
    planned_at + Duration::hours(DEPARTURE_OFFSET_HOURS)
}

/// Time to cover `distance_nm` at `speed_knots`, at millisecond resolution.
pub fn sailing_time(distance_nm: f64, speed_knots: f64) -> Duration {
    if !(distance_nm.is_finite() && speed_knots.is_finite()) || distance_nm <= 0.0 || speed_knots <= 0.0 {
        return Duration::zero();
    }
    let elapsed_days = distance_nm / (speed_knots * 24.0);
    Duration::milliseconds((elapsed_days * 24.0 * MILLIS_PER_HOUR).round() as i64)
}

/// Assign pass times from cumulative distance along the course.
///
/// The origin passes at departure; every later waypoint passes at
/// `departure + cumulative_nm / (speed * 24)` days. Cumulative distance never
/// decreases, so the result is ordered by pass time.
pub fn estimate_schedule(
    course: Vec<CoursePoint>,
    speed_knots: f64,
    planned_at: DateTime<Utc>,
) -> Schedule {
    let departure_time = departure_for(planned_at);
    let mut cumulative_nm = 0.0;
    let mut previous = None;
    let mut waypoints = Vec::with_capacity(course.len());

    for point in course {
        if let Some(prev) = previous {
            cumulative_nm += distance_nm(prev, point.position);
        }
        previous = Some(point.position);
        waypoints.push(Waypoint {
            position: point.position,
            estimated_pass_time: departure_time + sailing_time(cumulative_nm, speed_knots),
            status: point.status,
            port_call: point.port_call,
        });
    }

    let estimated_arrival = waypoints
        .last()
        .map(|wp| wp.estimated_pass_time)
        .unwrap_or(departure_time);

    Schedule {
        departure_time,
        estimated_arrival,
        waypoints,
        total_distance_nm: cumulative_nm,
    }
}
