//! Server configuration from environment.

use std::env;
use std::path::PathBuf;

use voyage_core::PlannerConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// JSON catalog to load instead of the seeded ports and fleet
    pub catalog_path: Option<PathBuf>,
    pub planner: PlannerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            catalog_path: None,
            planner: PlannerConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let parse_f64 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<f64>().ok());

        let mut planner = defaults.planner;
        if let Some(lat) = parse_f64("VOYAGE_PENINSULA_SOUTH_LAT") {
            planner.peninsula.south_latitude = lat;
        }
        if let Some(lat) = parse_f64("VOYAGE_PENINSULA_NORTH_LAT") {
            planner.peninsula.north_latitude = lat;
        }
        if let Some(probability) = parse_f64("VOYAGE_PORT_CALL_PROBABILITY") {
            planner.port_call_probability = probability;
        }

        Self {
            server_port: lookup("VOYAGE_PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.server_port),
            catalog_path: lookup("VOYAGE_CATALOG_PATH")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            planner,
        }
    }
}
