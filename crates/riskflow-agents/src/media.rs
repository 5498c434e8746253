//! Media reporting on the hazard.
//!
//! The media is silent until the scheduler starts its reporting. From then
//! on its intensity, the chance that a media-consuming agent actually sees
//! a report, feeds back on the population's mood: a calm population
//! (average risk perception below about 2.9) makes coverage fade, an
//! alarmed one makes it grow, up to a ceiling of [`MAX_MEDIA_INTENSITY`].

use riskflow_types::{RiskSignal, SignalOrigin};
use tracing::debug;

use crate::hazard::Hazard;
use crate::scale::rescale;

/// Ceiling on reporting intensity; blanket coverage is not realistic.
pub const MAX_MEDIA_INTENSITY: f64 = 0.8;

/// Growth of the reporting-length diagnostic per reporting tick.
pub const REPORTING_LENGTH_STEP: f64 = 0.05;

/// The media, as one institution per run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Media {
    reporting: bool,
    multiplier: f64,
    intensity: f64,
    length_of_reporting: f64,
    signals_sent: u64,
}

impl Media {
    /// Create a media institution that is not yet reporting.
    pub const fn new() -> Self {
        Self {
            reporting: false,
            multiplier: 0.0,
            intensity: 0.0,
            length_of_reporting: 0.0,
            signals_sent: 0,
        }
    }

    /// Begin reporting with a signal multiplier and a starting intensity.
    ///
    /// The intensity is clamped into `[0, 0.8]`.
    pub fn start_reporting(&mut self, multiplier: f64, intensity: f64) {
        self.reporting = true;
        self.multiplier = multiplier;
        self.intensity = intensity.clamp(0.0, MAX_MEDIA_INTENSITY);
        debug!(
            multiplier = self.multiplier,
            intensity = self.intensity,
            "media reporting started"
        );
    }

    /// Whether reporting has started.
    pub const fn is_reporting(&self) -> bool {
        self.reporting
    }

    /// Signal multiplier, zero before reporting starts.
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Current reporting intensity in `[0, 0.8]`.
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Diagnostic counter, grows by 0.05 per reporting tick.
    pub const fn length_of_reporting(&self) -> f64 {
        self.length_of_reporting
    }

    /// The signal a reached agent receives, saturated into `[0.1, 2.0]`.
    pub fn signal(&self, hazard: &Hazard) -> RiskSignal {
        RiskSignal::new(SignalOrigin::Media, self.multiplier * hazard.risk_multiplier())
    }

    /// Adapt the intensity to the population's average risk perception.
    ///
    /// Does nothing until reporting has started.
    pub fn tick_behaviour(&mut self, average_risk_perception: f64) {
        if !self.reporting {
            return;
        }
        let damping = rescale(average_risk_perception, 1.0, 5.0, 2.0, 0.1);
        self.intensity = (self.intensity * damping).clamp(0.0, MAX_MEDIA_INTENSITY);
        self.length_of_reporting += REPORTING_LENGTH_STEP;
    }

    /// Count one delivered media signal.
    pub const fn record_signal_sent(&mut self) {
        self.signals_sent = self.signals_sent.saturating_add(1);
    }

    /// Signals delivered since the last drain, without resetting.
    pub const fn peek_signals_sent(&self) -> u64 {
        self.signals_sent
    }

    /// Return the signals delivered since the last drain and reset.
    pub const fn drain_signals_sent(&mut self) -> u64 {
        let sent = self.signals_sent;
        self.signals_sent = 0;
        sent
    }
}
