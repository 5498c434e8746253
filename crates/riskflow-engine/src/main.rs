//! Driver binary for the Riskflow simulation.
//!
//! Loads a scenario, grows the social network once, runs the configured
//! number of trials over it, and exports the recordings and network
//! analysis as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (first CLI argument, default `riskflow-config.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Grow the population and build the simulation
//! 4. Run the trials, writing each run as it completes
//! 5. Write the mean series, agent summary, scenario parameters, and
//!    network analysis

mod error;
mod output;

use std::path::{Path, PathBuf};

use riskflow_core::analysis::{self, DegreeStats};
use riskflow_core::config::{LoggingConfig, SimulationConfig};
use riskflow_core::runner;
use riskflow_core::simulation::Simulation;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::output::{ExportCallback, NetworkStats, OutputWriter, ScenarioParameters};

/// Config file used when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "riskflow-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, the trials, or the export fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    // 1. Load configuration.
    let (config, config_found) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        config = %config_path.display(),
        config_found,
        "riskflow-engine starting"
    );

    run(&config)?;
    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the configuration at `path`, falling back to defaults if the file
/// does not exist. The flag reports whether the file was found.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}

/// Build the simulation, run every trial, and export the results.
fn run(config: &SimulationConfig) -> Result<(), EngineError> {
    let scenario = &config.scenario;
    info!(
        num_nodes = scenario.num_nodes,
        num_edges = scenario.num_edges,
        num_ticks = scenario.num_ticks,
        hazard = %scenario.hazard_name,
        num_runs = config.trials.num_runs,
        seed = ?scenario.seed,
        "Configuration loaded"
    );

    // 3. Build the simulation.
    let mut simulation = Simulation::from_scenario(scenario, &config.traits)?;

    let writer = OutputWriter::create(&config.output.directory)?;
    writer.write_json(
        "scenario-parameters.json",
        &ScenarioParameters {
            scenario,
            hazard_multiplier: simulation.hazard().risk_multiplier(),
            media_reporting_intensity: scenario.resolved_reporting_intensity(),
            traits: &config.traits,
            num_runs: config.trials.num_runs,
        },
    )?;

    // 4. Run the trials.
    let mut callback = ExportCallback::new(writer);
    let report = runner::run_trials(&mut simulation, &config.trials, &config.traits, &mut callback)?;
    let writer = callback.finish()?;

    // 5. Write aggregates and analysis of the last run's network.
    writer.write_json("mean-results.json", &report.mean)?;
    writer.write_json("agent-summary.json", &report.agent_summaries)?;

    let network = simulation.network();
    writer.write_json("network-ties.json", &analysis::adjacency_matrix(network))?;
    writer.write_json(
        "network-stats.json",
        &NetworkStats {
            nodes: network.node_count(),
            edges: network.edge_count(),
            degree: DegreeStats::from_network(network),
        },
    )?;
    writer.write_json(
        "perception-distance-after.json",
        &analysis::perception_distance_matrix(network),
    )?;

    simulation.reset();
    writer.write_json(
        "perception-distance-before.json",
        &analysis::perception_distance_matrix(simulation.network()),
    )?;

    let final_average = report
        .mean
        .average_risk_perception
        .last()
        .copied()
        .unwrap_or(0.0);
    info!(
        runs = report.runs.len(),
        final_mean_risk_perception = final_average,
        output = %writer.directory().display(),
        "riskflow-engine finished"
    );
    Ok(())
}
