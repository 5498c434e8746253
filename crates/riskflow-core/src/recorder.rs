//! Time-series recording of tick snapshots.
//!
//! A [`TimeSeries`] keeps nine parallel, append-only series: the four colour
//! counts, the four signal counts by origin, and the average risk
//! perception. A full run records the pre-run snapshot plus one per tick,
//! so every series ends with `num_ticks + 1` entries.
//!
//! [`MeanSeries`] averages several runs of the same scenario element-wise.

use riskflow_types::TickSnapshot;
use serde::{Deserialize, Serialize};

/// Error type for recorder operations.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    /// Averaging needs at least one run.
    #[error("cannot average zero runs")]
    NoRuns,

    /// Runs of different length cannot be averaged element-wise.
    #[error("run {run} has {found} entries, expected {expected}")]
    LengthMismatch {
        /// Index of the offending run.
        run: usize,
        /// Length of the first run.
        expected: usize,
        /// Length of the offending run.
        found: usize,
    },
}

/// Nine equal-length series describing one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Agents in the green category.
    pub green: Vec<u64>,
    /// Agents in the yellow category.
    pub yellow: Vec<u64>,
    /// Agents in the orange category.
    pub orange: Vec<u64>,
    /// Agents in the red category.
    pub red: Vec<u64>,
    /// Government signals sent.
    pub government_signals: Vec<u64>,
    /// Media signals delivered.
    pub media_signals: Vec<u64>,
    /// Neighbour signals sent.
    pub neighbour_signals: Vec<u64>,
    /// Grid signals injected.
    pub grid_signals: Vec<u64>,
    /// Mean risk perception.
    pub average_risk_perception: Vec<f64>,
}

impl TimeSeries {
    /// Create an empty recording.
    pub const fn new() -> Self {
        Self {
            green: Vec::new(),
            yellow: Vec::new(),
            orange: Vec::new(),
            red: Vec::new(),
            government_signals: Vec::new(),
            media_signals: Vec::new(),
            neighbour_signals: Vec::new(),
            grid_signals: Vec::new(),
            average_risk_perception: Vec::new(),
        }
    }

    /// Append one snapshot to every series.
    pub fn record(&mut self, snapshot: &TickSnapshot) {
        self.green.push(snapshot.green);
        self.yellow.push(snapshot.yellow);
        self.orange.push(snapshot.orange);
        self.red.push(snapshot.red);
        self.government_signals.push(snapshot.government_signals);
        self.media_signals.push(snapshot.media_signals);
        self.neighbour_signals.push(snapshot.neighbour_signals);
        self.grid_signals.push(snapshot.grid_signals);
        self.average_risk_perception
            .push(snapshot.average_risk_perception);
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.green.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.green.is_empty()
    }

    /// Drop every recorded entry.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Element-wise mean of several runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanSeries {
    /// Number of runs averaged.
    pub runs: usize,
    /// Mean agents in the green category.
    pub green: Vec<f64>,
    /// Mean agents in the yellow category.
    pub yellow: Vec<f64>,
    /// Mean agents in the orange category.
    pub orange: Vec<f64>,
    /// Mean agents in the red category.
    pub red: Vec<f64>,
    /// Mean government signals sent.
    pub government_signals: Vec<f64>,
    /// Mean media signals delivered.
    pub media_signals: Vec<f64>,
    /// Mean neighbour signals sent.
    pub neighbour_signals: Vec<f64>,
    /// Mean grid signals injected.
    pub grid_signals: Vec<f64>,
    /// Mean of the average risk perception.
    pub average_risk_perception: Vec<f64>,
}

impl MeanSeries {
    /// Average equal-length runs entry by entry.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::NoRuns`] for an empty slice and
    /// [`RecorderError::LengthMismatch`] if the runs differ in length.
    pub fn from_runs(runs: &[TimeSeries]) -> Result<Self, RecorderError> {
        let first = runs.first().ok_or(RecorderError::NoRuns)?;
        let expected = first.len();
        for (run, series) in runs.iter().enumerate() {
            if series.len() != expected {
                return Err(RecorderError::LengthMismatch {
                    run,
                    expected,
                    found: series.len(),
                });
            }
        }

        Ok(Self {
            runs: runs.len(),
            green: count_mean(runs, expected, |s| s.green.as_slice()),
            yellow: count_mean(runs, expected, |s| s.yellow.as_slice()),
            orange: count_mean(runs, expected, |s| s.orange.as_slice()),
            red: count_mean(runs, expected, |s| s.red.as_slice()),
            government_signals: count_mean(runs, expected, |s| s.government_signals.as_slice()),
            media_signals: count_mean(runs, expected, |s| s.media_signals.as_slice()),
            neighbour_signals: count_mean(runs, expected, |s| s.neighbour_signals.as_slice()),
            grid_signals: count_mean(runs, expected, |s| s.grid_signals.as_slice()),
            average_risk_perception: element_mean(runs, expected, |series, index| {
                series
                    .average_risk_perception
                    .get(index)
                    .copied()
                    .unwrap_or(0.0)
            }),
        })
    }
}

/// Mean across runs of one count series.
fn count_mean(
    runs: &[TimeSeries],
    length: usize,
    select: impl Fn(&TimeSeries) -> &[u64],
) -> Vec<f64> {
    element_mean(runs, length, |series, index| {
        select(series).get(index).map_or(0.0, |value| *value as f64)
    })
}

/// Mean across runs of the value `read` returns at each index.
fn element_mean(
    runs: &[TimeSeries],
    length: usize,
    read: impl Fn(&TimeSeries, usize) -> f64,
) -> Vec<f64> {
    let divisor = runs.len() as f64;
    (0..length)
        .map(|index| runs.iter().map(|series| read(series, index)).sum::<f64>() / divisor)
        .collect()
}
