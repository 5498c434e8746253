//! The hazard event that sets the run in motion.

use riskflow_types::{RiskSignal, SignalOrigin};

/// A named hazard with a fixed risk multiplier.
///
/// The multiplier scales every media, government, and neighbour signal of
/// the run. Grid signals carry it directly as their magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    name: String,
    risk_multiplier: f64,
}

impl Hazard {
    /// Create a hazard.
    pub fn new(name: impl Into<String>, risk_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            risk_multiplier,
        }
    }

    /// Hazard name, e.g. `"Automation"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Multiplier applied to every signal of the run.
    pub const fn risk_multiplier(&self) -> f64 {
        self.risk_multiplier
    }

    /// The signal delivered to an agent the hazard strikes directly.
    pub fn grid_signal(&self) -> RiskSignal {
        RiskSignal::new(SignalOrigin::Grid, self.risk_multiplier)
    }
}
