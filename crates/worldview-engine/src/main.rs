//! Engine binary for Worldview.
//!
//! Wires the demo world, the simulation step loop, and the query service
//! together. Both the step loop and the service reach the world through
//! one [`SimulationGate`], so a query always sees the world between two
//! steps.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `worldview-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Generate the demo world
//! 4. Create the simulation gate and step control
//! 5. Start the query service
//! 6. Run the step loop (or idle) until Ctrl-C or a configured limit
//! 7. Log the result

mod error;
mod simulation;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use worldview_core::config::{LoggingConfig, WorldConfig};
use worldview_core::{SimulationGate, StepControl, WorldviewConfig, runner};
use worldview_service::{AppState, spawn_service};
use worldview_world::{DemoParams, MemoryWorld, create_demo_world};

use crate::error::EngineError;
use crate::simulation::{DemoSimulation, ProgressLog};

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "worldview-config.yaml";

/// Steps between two progress log lines.
const PROGRESS_EVERY: u64 = 100;

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the step loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        host = config.server.host,
        port = config.server.port,
        step_interval_ms = config.simulation.step_interval_ms,
        "worldview-engine starting"
    );

    // 3. Generate the demo world.
    let world = create_demo_world(&demo_params(&config.world)).map_err(EngineError::from)?;

    // 4. Gate and step control.
    let gate = Arc::new(SimulationGate::new(world));
    let control = Arc::new(StepControl::new(&config.simulation));

    // 5. Start the query service.
    let state = Arc::new(
        AppState::new(Arc::clone(&gate), config.sync.clone()).with_control(Arc::clone(&control)),
    );
    let service = spawn_service(config.server.clone(), state).map_err(EngineError::from)?;

    {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl-C");
                return;
            }
            info!("Ctrl-C received, stopping");
            control.request_stop();
        });
    }

    // 6. Run the step loop, or idle until stopped.
    if config.simulation.enabled {
        let mut sim = DemoSimulation::new(config.world.seed, config.simulation.mutations_per_step);
        let mut callback = ProgressLog::new(PROGRESS_EVERY);
        let result = runner::run_simulation::<MemoryWorld>(&gate, &mut sim, &control, &mut callback)
            .await
            .map_err(EngineError::from)?;

        // 7. Log results.
        runner::log_simulation_end(&result);
    } else {
        info!("Simulation disabled, serving a static world");
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
        }
    }

    service.abort();
    info!(
        steps = gate.steps(),
        suspensions = gate.suspensions(),
        "worldview-engine shutdown complete"
    );
    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults
/// (with environment overrides) when the file does not exist.
fn load_config() -> Result<WorldviewConfig, EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok(WorldviewConfig::from_file(path)?)
    } else {
        Ok(WorldviewConfig::parse("")?)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}

fn demo_params(world: &WorldConfig) -> DemoParams {
    DemoParams {
        size_x: world.size_x,
        size_y: world.size_y,
        size_z: world.size_z,
        world_width: world.world_width,
        world_height: world.world_height,
        seed: world.seed,
        name: world.name.clone(),
    }
}
