//! Plans the same voyage many times under every strategy and checks each
//! plan against the route plan invariants.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use voyage_core::{PlanRouteRequest, RouteStrategy};
use voyage_server::config::Config;
use voyage_server::state::AppState;

/// Route plan stress runner
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Origin port id
    #[arg(long, default_value = "CNSHA")]
    origin: String,

    /// Destination port id
    #[arg(long, default_value = "CNTAO")]
    destination: String,

    /// Ship id
    #[arg(long, default_value = "SHIP-001")]
    ship: String,

    /// Plans per strategy
    #[arg(long, default_value_t = 100)]
    iterations: u64,

    /// First seed; iteration i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Catalog JSON file (defaults to VOYAGE_CATALOG_PATH or the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Default)]
struct StrategyStats {
    plans: u64,
    min_nm: u32,
    max_nm: u32,
    risks: usize,
    port_calls: usize,
    violations: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env();
    if args.catalog.is_some() {
        config.catalog_path = args.catalog.clone();
    }
    let state = Arc::new(AppState::new(config)?);

    let mut failed = 0usize;
    for strategy in RouteStrategy::ALL {
        println!(
            "\n=== {} -> {} ({}) x{} ===",
            args.origin, args.destination, strategy, args.iterations
        );

        let mut handles = Vec::with_capacity(args.iterations as usize);
        for i in 0..args.iterations {
            let state = state.clone();
            let request = PlanRouteRequest {
                origin_port_id: args.origin.clone(),
                destination_port_id: args.destination.clone(),
                ship_id: args.ship.clone(),
                strategy: strategy.name().to_string(),
                seed: Some(args.seed.wrapping_add(i)),
            };
            handles.push(tokio::task::spawn_blocking(move || {
                (i, state.plan_route(&request))
            }));
        }

        let mut stats = StrategyStats {
            min_nm: u32::MAX,
            ..StrategyStats::default()
        };
        for handle in handles {
            let (i, outcome) = handle.await?;
            let plan = match outcome {
                Ok(plan) => plan,
                Err(err) => bail!("planning failed: {}", err),
            };
            stats.plans += 1;
            stats.min_nm = stats.min_nm.min(plan.distance_nautical_miles);
            stats.max_nm = stats.max_nm.max(plan.distance_nautical_miles);
            stats.risks += plan.weather_risks.len();
            stats.port_calls += plan
                .waypoints
                .iter()
                .filter(|waypoint| waypoint.port_call.is_some())
                .count();
            for violation in plan.validate() {
                stats.violations.push(format!("seed {}: {}", args.seed.wrapping_add(i), violation));
            }
        }

        println!(
            "Plans: {} | distance {}-{} nm | risks {} | port calls {}",
            stats.plans, stats.min_nm, stats.max_nm, stats.risks, stats.port_calls
        );
        if stats.violations.is_empty() {
            println!("Invariant check: PASS");
        } else {
            println!("Invariant check: FAIL ({})", stats.violations.len());
            for violation in &stats.violations {
                println!(" - {}", violation);
            }
            failed += stats.violations.len();
        }
    }

    if failed > 0 {
        bail!("{} invariant violations", failed);
    }
    Ok(())
}
