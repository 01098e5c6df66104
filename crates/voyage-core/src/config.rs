//! Tunable parameters for route synthesis.

use serde::{Deserialize, Serialize};

use crate::geo::{lerp, GeoPoint};

/// Hours between the planning instant and departure.
pub const DEPARTURE_OFFSET_HOURS: i64 = 24;

/// Configuration for the waypoint synthesizer and risk overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Landmass a course must round when its endpoints straddle the band
    pub peninsula: PeninsulaBand,
    /// Chance that an economical interior point is swapped for a nearby port
    pub port_call_probability: f64,
    /// Search radius for port calls and bypass snapping, nautical miles
    pub port_call_radius_nm: f64,
    /// Maximum per-axis offset of a risk marker from its waypoint, degrees
    pub risk_jitter_degrees: f64,
    /// Heading of open sea relative to the coast, degrees
    pub seaward_heading_deg: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            peninsula: PeninsulaBand::default(),
            port_call_probability: 0.5,
            port_call_radius_nm: 60.0,
            risk_jitter_degrees: 0.2,
            seaward_heading_deg: 90.0, // East China / Yellow Sea coast faces east
        }
    }
}

impl PlannerConfig {
    /// Probability clamped into `[0, 1]` so it is always safe to sample.
    pub fn port_call_probability(&self) -> f64 {
        if self.port_call_probability.is_finite() {
            self.port_call_probability.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// A peninsula modeled as a latitude band with a cape on its seaward side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeninsulaBand {
    /// A course starting south of this latitude...
    pub south_latitude: f64,
    /// ...and ending north of this one (or vice versa) must round the cape
    pub north_latitude: f64,
    /// Easternmost point of the landmass
    pub cape: GeoPoint,
    /// Both endpoints must lie within this longitude span for the band to apply
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Default for PeninsulaBand {
    fn default() -> Self {
        Self {
            south_latitude: 35.0,
            north_latitude: 37.0,
            cape: GeoPoint::new(122.7, 37.4), // Chengshan Cape, Shandong
            min_longitude: 117.0,
            max_longitude: 127.0,
        }
    }
}

impl PeninsulaBand {
    /// True when a course between the two points has to round the peninsula.
    pub fn is_straddled_by(&self, a: GeoPoint, b: GeoPoint) -> bool {
        let in_span = |p: GeoPoint| p.longitude >= self.min_longitude && p.longitude <= self.max_longitude;
        if !in_span(a) || !in_span(b) {
            return false;
        }
        let (south, north) = if a.latitude <= b.latitude { (a, b) } else { (b, a) };
        if south.latitude >= self.south_latitude || north.latitude <= self.north_latitude {
            return false;
        }
        // A direct line that is already east of the cape at its latitude clears the landmass.
        let latitude = self.cape.latitude.min(north.latitude);
        let t = (latitude - south.latitude) / (north.latitude - south.latitude);
        lerp(south, north, t).longitude < self.cape.longitude
    }
}
