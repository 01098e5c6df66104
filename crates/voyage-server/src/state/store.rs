//! Read-only catalog plus planner configuration shared across requests.

use anyhow::{Context, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use voyage_core::{Catalog, PlanError, PlanRouteRequest, PlannerConfig, RoutePlan, RoutePlanner};

use crate::config::Config;

/// Application state. Nothing in here is mutated after startup, so requests
/// share it through an `Arc` without locks.
pub struct AppState {
    config: Config,
    catalog: Arc<Catalog>,
}

impl AppState {
    /// Load the catalog named by the config, or the seeded one.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading catalog {}", path.display()))?;
                let catalog = Catalog::from_json(&raw)
                    .with_context(|| format!("parsing catalog {}", path.display()))?;
                tracing::info!(
                    "Loaded catalog from {} ({} ports, {} ships)",
                    path.display(),
                    catalog.port_count(),
                    catalog.ships().len()
                );
                catalog
            }
            None => Catalog::seeded(),
        };
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn planner_config(&self) -> &PlannerConfig {
        &self.config.planner
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Plan one request with its own random source.
    ///
    /// A request seed makes the plan reproducible; otherwise the generator is
    /// seeded from the OS.
    pub fn plan_route(&self, request: &PlanRouteRequest) -> Result<RoutePlan, PlanError> {
        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let planner = RoutePlanner::new(self.catalog(), self.catalog(), self.planner_config());
        planner.build_at(request, Utc::now(), &mut rng)
    }
}
