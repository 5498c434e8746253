//! JSON export of trial results.
//!
//! Every file lands flat in the configured output directory:
//!
//! | File | Contents |
//! |------|----------|
//! | `run-<n>.json` | The nine series of run `n` |
//! | `mean-results.json` | Element-wise mean across runs |
//! | `agent-summary.json` | Degree and signal totals of the last run |
//! | `scenario-parameters.json` | Resolved scenario, traits, and trial count |
//! | `network-ties.json` | 0/1 tie matrix |
//! | `network-stats.json` | Node, edge, and degree summary |
//! | `perception-distance-before.json` | Pairwise distances before the last run |
//! | `perception-distance-after.json` | Pairwise distances after the last run |

use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use riskflow_agents::TraitDistribution;
use riskflow_core::analysis::DegreeStats;
use riskflow_core::config::ScenarioConfig;
use riskflow_core::recorder::TimeSeries;
use riskflow_core::runner::TickCallback;
use riskflow_core::simulation::Simulation;
use riskflow_types::TickSnapshot;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::EngineError;

/// Scenario parameters as they were actually used, defaults resolved.
#[derive(Debug, Serialize)]
pub struct ScenarioParameters<'a> {
    /// The scenario section of the config.
    pub scenario: &'a ScenarioConfig,
    /// Hazard multiplier after preset lookup.
    pub hazard_multiplier: f64,
    /// Media reporting intensity after defaulting.
    pub media_reporting_intensity: f64,
    /// Trait distribution agents were drawn from.
    pub traits: &'a TraitDistribution,
    /// Number of runs averaged.
    pub num_runs: u32,
}

/// Structural summary of the network.
#[derive(Debug, Serialize)]
pub struct NetworkStats {
    /// Number of agents.
    pub nodes: usize,
    /// Number of undirected ties.
    pub edges: usize,
    /// Degree distribution, absent for an empty network.
    pub degree: Option<DegreeStats>,
}

/// Writes JSON files into one output directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    directory: PathBuf,
}

impl OutputWriter {
    /// Create the directory (and parents) if needed.
    pub fn create(directory: &Path) -> Result<Self, EngineError> {
        fs::create_dir_all(directory).map_err(|source| EngineError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
        Ok(Self {
            directory: directory.to_path_buf(),
        })
    }

    /// The directory files are written into.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Serialize `value` as pretty JSON into `file_name`.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf, EngineError> {
        let path = self.directory.join(file_name);
        let io_error = |source| EngineError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value).map_err(|source| EngineError::Json {
            path: path.clone(),
            source,
        })?;
        writer.write_all(b"\n").map_err(io_error)?;
        writer.flush().map_err(io_error)?;

        debug!(path = %path.display(), "Wrote output file");
        Ok(path)
    }

    /// Write the recording of run `run`.
    pub fn write_run(&self, run: u32, series: &TimeSeries) -> Result<PathBuf, EngineError> {
        self.write_json(&format!("run-{run}.json"), series)
    }
}

/// Tick callback that writes each run to disk as soon as it finishes.
///
/// The trait hands callbacks no error channel, so the first failure is kept
/// and later runs are skipped until [`ExportCallback::finish`] reports it.
pub struct ExportCallback {
    writer: OutputWriter,
    error: Option<EngineError>,
}

impl ExportCallback {
    /// Create a callback writing through `writer`.
    pub const fn new(writer: OutputWriter) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Surface the first write failure, if any.
    pub fn finish(self) -> Result<OutputWriter, EngineError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.writer),
        }
    }
}

impl TickCallback for ExportCallback {
    fn on_tick(&mut self, run: u32, snapshot: &TickSnapshot, _simulation: &Simulation) {
        debug!(
            run,
            tick = ?snapshot.tick,
            red = snapshot.red,
            average_risk_perception = snapshot.average_risk_perception,
            "Tick recorded"
        );
    }

    fn on_run_complete(&mut self, run: u32, series: &TimeSeries) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.writer.write_run(run, series) {
            warn!(run, error = %error, "Failed to write run output");
            self.error = Some(error);
        }
    }
}
