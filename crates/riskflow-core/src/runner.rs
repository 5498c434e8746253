//! Trial runner: drives one or more complete runs of a scenario.
//!
//! This module provides [`run_trial`], which records a single run from its
//! pre-run snapshot to its last tick, and [`run_trials`], which repeats it
//! over the same population (or a freshly grown one per run) and averages
//! the results.
//!
//! The runner wraps the single-tick [`Simulation::tick`] and adds the
//! recording and repetition around it.

use riskflow_agents::TraitDistribution;
use riskflow_types::{AgentSummary, TickSnapshot};
use tracing::info;

use crate::config::TrialsConfig;
use crate::recorder::{MeanSeries, RecorderError, TimeSeries};
use crate::simulation::{RunPhase, Simulation, SimulationError};

/// Errors that can occur during a trial.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: SimulationError,
    },

    /// The recorded runs could not be averaged.
    #[error("recorder error: {source}")]
    Recorder {
        /// The underlying recorder error.
        #[from]
        source: RecorderError,
    },
}

/// Results of a set of trials.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialsReport {
    /// One recording per run, in run order.
    pub runs: Vec<TimeSeries>,
    /// Element-wise mean of all runs.
    pub mean: MeanSeries,
    /// Per-agent signal totals of the last run.
    pub agent_summaries: Vec<AgentSummary>,
}

/// Callback invoked while a trial runs.
///
/// Implementations can stream snapshots elsewhere, print progress, etc.
pub trait TickCallback {
    /// Called after each tick completes successfully.
    fn on_tick(&mut self, run: u32, snapshot: &TickSnapshot, simulation: &Simulation);

    /// Called after a run's last tick.
    fn on_run_complete(&mut self, _run: u32, _series: &TimeSeries) {}
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _run: u32, _snapshot: &TickSnapshot, _simulation: &Simulation) {}
}

/// Run one complete trial and return its recording.
///
/// A simulation that has already ticked is reset first. The recording
/// starts with the pre-run snapshot, so it holds `num_ticks + 1` entries.
///
/// # Errors
///
/// Returns [`RunnerError::Simulation`] if a tick fails.
pub fn run_trial(
    simulation: &mut Simulation,
    run: u32,
    callback: &mut dyn TickCallback,
) -> Result<TimeSeries, RunnerError> {
    if simulation.phase() != RunPhase::NotStarted {
        simulation.reset();
    }

    let mut series = TimeSeries::new();
    series.record(&simulation.snapshot());

    while simulation.phase() != RunPhase::Finished {
        let snapshot = simulation.tick()?;
        series.record(&snapshot);
        callback.on_tick(run, &snapshot, simulation);
    }

    let final_average = series.average_risk_perception.last().copied().unwrap_or(0.0);
    info!(
        run,
        ticks = simulation.schedule().num_ticks(),
        final_average_risk_perception = final_average,
        "Run finished"
    );
    callback.on_run_complete(run, &series);
    Ok(series)
}

/// Run `trials.num_runs` trials and average them.
///
/// Between runs the population is either reset to its starting state or,
/// with `trials.regenerate_network`, replaced by a freshly grown one.
///
/// # Errors
///
/// Returns [`RunnerError`] if a run fails or the runs cannot be averaged.
pub fn run_trials(
    simulation: &mut Simulation,
    trials: &TrialsConfig,
    traits: &TraitDistribution,
    callback: &mut dyn TickCallback,
) -> Result<TrialsReport, RunnerError> {
    info!(
        runs = trials.num_runs,
        regenerate_network = trials.regenerate_network,
        agents = simulation.network().node_count(),
        hazard = simulation.hazard().name(),
        "Trials starting"
    );

    let mut runs = Vec::new();
    for run in 0..trials.num_runs {
        if run > 0 {
            if trials.regenerate_network {
                simulation.regenerate_network(traits)?;
            } else {
                simulation.reset();
            }
        }
        runs.push(run_trial(simulation, run, callback)?);
    }

    let mean = MeanSeries::from_runs(&runs)?;
    Ok(TrialsReport {
        runs,
        mean,
        agent_summaries: simulation.agent_summaries(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;

    fn simulation(num_ticks: u64) -> Simulation {
        let scenario = ScenarioConfig {
            num_nodes: 40,
            num_ticks,
            num_affected: 8,
            seed: Some(21),
            ..ScenarioConfig::default()
        };
        Simulation::from_scenario(&scenario, &TraitDistribution::default()).unwrap()
    }

    struct Counting {
        ticks: u32,
        runs: u32,
    }

    impl TickCallback for Counting {
        fn on_tick(&mut self, _run: u32, _snapshot: &TickSnapshot, _simulation: &Simulation) {
            self.ticks += 1;
        }

        fn on_run_complete(&mut self, _run: u32, _series: &TimeSeries) {
            self.runs += 1;
        }
    }

    #[test]
    fn trial_records_num_ticks_plus_one() {
        let mut sim = simulation(12);
        let series = run_trial(&mut sim, 0, &mut NoOpCallback).unwrap();
        assert_eq!(series.len(), 13);
        assert_eq!(series.average_risk_perception.len(), 13);
        assert_eq!(sim.phase(), RunPhase::Finished);
    }

    #[test]
    fn finished_simulation_is_reset_before_trial() {
        let mut sim = simulation(5);
        let first = run_trial(&mut sim, 0, &mut NoOpCallback).unwrap();
        let second = run_trial(&mut sim, 1, &mut NoOpCallback).unwrap();
        assert_eq!(second.len(), first.len());
        assert_eq!(first.green.first(), second.green.first());
    }

    #[test]
    fn trials_average_every_run() {
        let mut sim = simulation(10);
        let trials = TrialsConfig {
            num_runs: 3,
            regenerate_network: false,
        };
        let mut callback = Counting { ticks: 0, runs: 0 };
        let report = run_trials(&mut sim, &trials, &TraitDistribution::default(), &mut callback)
            .unwrap();
        assert_eq!(report.runs.len(), 3);
        assert_eq!(report.mean.runs, 3);
        assert_eq!(report.mean.green.len(), 11);
        assert_eq!(report.agent_summaries.len(), 40);
        assert_eq!(callback.ticks, 30);
        assert_eq!(callback.runs, 3);
    }

    #[test]
    fn regenerated_trials_keep_shape() {
        let mut sim = simulation(4);
        let trials = TrialsConfig {
            num_runs: 2,
            regenerate_network: true,
        };
        let report =
            run_trials(&mut sim, &trials, &TraitDistribution::default(), &mut NoOpCallback)
                .unwrap();
        assert_eq!(report.runs.len(), 2);
        for series in &report.runs {
            assert_eq!(series.len(), 5);
        }
    }
}
