//! Headless tick driver for the Simul simulation.
//!
//! Loads configuration, assembles the starting world and the rule catalog,
//! and runs a fixed number of ticks, logging a summary after each one and
//! a full JSON snapshot at the configured interval.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `simul-config.yaml` (or `$SIMUL_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the starting world and the simulator
//! 4. Run `simulation.max_ticks` ticks
//! 5. Log the final snapshot

mod error;

use std::path::PathBuf;

use simul_core::config::SimulationConfig;
use simul_core::service::{ServiceError, WorldService};
use simul_core::simulator::SimulationError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "simul-config.yaml";

/// Environment variable overriding the configuration path.
const CONFIG_PATH_ENV: &str = "SIMUL_CONFIG";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, world assembly, or a tick fails.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration before logging so the configured level applies.
    let config_path = config_path();
    let found = config_path.exists();
    let config = if found {
        SimulationConfig::from_file(&config_path)?
    } else {
        SimulationConfig::default()
    };

    // 2. Initialize structured logging. `RUST_LOG` wins over the config.
    let level = config.logging.level.clone();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_e| EnvFilter::new(level)),
        )
        .with_target(true)
        .init();

    info!("simul-engine starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        world_name = %config.world.name,
        seed = ?config.world.seed,
        randomizer = ?config.world.randomizer,
        max_ticks = config.simulation.max_ticks,
        "Configuration resolved"
    );

    // 3. Build world and simulator.
    let mut service = WorldService::from_config(&config)?;

    // 4. Run the tick loop.
    let interval = config.simulation.snapshot_interval_ticks;
    for _ in 0..config.simulation.max_ticks {
        match service.step() {
            Ok(summary) => {
                info!(
                    tick = summary.tick,
                    rules_applied = summary.rules_applied,
                    actions_executed = summary.actions_executed,
                    actions_deferred = summary.actions_deferred,
                    "Tick complete"
                );
            }
            Err(ServiceError::Simulation(SimulationError::RejectedActions { tick, rejected })) => {
                warn!(tick, rejected = rejected.len(), "Tick complete with rejected actions");
            }
            Err(e) => return Err(e.into()),
        }

        let tick = service.ticks();
        if tick.checked_rem(interval) == Some(0) {
            log_snapshot(&service)?;
        }
    }

    // 5. Final state.
    log_snapshot(&service)?;
    info!(ticks = service.ticks(), "simul-engine finished");
    Ok(())
}

/// Resolve the configuration path from the environment or the default.
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Log the full read model as one JSON line.
fn log_snapshot(service: &WorldService) -> Result<(), EngineError> {
    let snapshot = service.snapshot()?;
    let json = serde_json::to_string(&snapshot)?;
    info!(tick = snapshot.ticks, snapshot = %json, "World snapshot");
    Ok(())
}
