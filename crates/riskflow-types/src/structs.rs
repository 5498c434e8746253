//! Core value structs exchanged between the agents, the scheduler, and the
//! recorder.

use serde::{Deserialize, Serialize};

use crate::bounds::clamp_magnitude;
use crate::enums::{ColorCategory, SignalOrigin};
use crate::ids::AgentId;

// ---------------------------------------------------------------------------
// Risk signal
// ---------------------------------------------------------------------------

/// A unit message carrying a bounded magnitude and an origin tag.
///
/// Signals are immutable once created. A signal sits in exactly one agent's
/// inbox and is consumed by that agent's next activation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSignal {
    origin: SignalOrigin,
    magnitude: f64,
}

impl RiskSignal {
    /// Create a signal, saturating `magnitude` into the signal domain
    /// `[0.1, 2.0]`.
    pub fn new(origin: SignalOrigin, magnitude: f64) -> Self {
        Self {
            origin,
            magnitude: clamp_magnitude(magnitude),
        }
    }

    /// Where the signal came from.
    pub const fn origin(&self) -> SignalOrigin {
        self.origin
    }

    /// The signal's magnitude, always within `[0.1, 2.0]`.
    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

// ---------------------------------------------------------------------------
// Tick snapshot
// ---------------------------------------------------------------------------

/// Aggregate network state at the end of one tick.
///
/// Signal counts cover only the signals sent since the previous snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// The tick this snapshot closes, or `None` for the pre-run snapshot.
    pub tick: Option<u64>,
    /// Agents with a green colour category.
    pub green: u64,
    /// Agents with a yellow colour category.
    pub yellow: u64,
    /// Agents with an orange colour category.
    pub orange: u64,
    /// Agents with a red colour category.
    pub red: u64,
    /// Mean risk perception across all agents.
    pub average_risk_perception: f64,
    /// Government signals sent.
    pub government_signals: u64,
    /// Media signals delivered.
    pub media_signals: u64,
    /// Signals sent by agents to their neighbours.
    pub neighbour_signals: u64,
    /// Grid signals injected by the hazard.
    pub grid_signals: u64,
}

impl TickSnapshot {
    /// Number of agents in a colour category.
    pub const fn count(&self, color: ColorCategory) -> u64 {
        match color {
            ColorCategory::Green => self.green,
            ColorCategory::Yellow => self.yellow,
            ColorCategory::Orange => self.orange,
            ColorCategory::Red => self.red,
        }
    }

    /// Number of signals of one origin.
    pub const fn signals(&self, origin: SignalOrigin) -> u64 {
        match origin {
            SignalOrigin::Government => self.government_signals,
            SignalOrigin::Media => self.media_signals,
            SignalOrigin::Neighbour => self.neighbour_signals,
            SignalOrigin::Grid => self.grid_signals,
        }
    }

    /// Sum of the four colour counts.
    pub const fn total_agents(&self) -> u64 {
        self.green
            .saturating_add(self.yellow)
            .saturating_add(self.orange)
            .saturating_add(self.red)
    }
}

// ---------------------------------------------------------------------------
// Agent summary
// ---------------------------------------------------------------------------

/// Post-run signal statistics for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    /// The agent described.
    pub agent_id: AgentId,
    /// Number of neighbours in the network.
    pub degree: usize,
    /// Signals the agent sent to neighbours over the run.
    pub total_sent: u64,
    /// Neighbour signals the agent processed over the run.
    pub total_received: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_magnitude_is_saturated() {
        let strong = RiskSignal::new(SignalOrigin::Media, 3.4);
        assert!((strong.magnitude() - 2.0).abs() < f64::EPSILON);
        let weak = RiskSignal::new(SignalOrigin::Neighbour, 0.01);
        assert!((weak.magnitude() - 0.1).abs() < f64::EPSILON);
        assert_eq!(weak.origin(), SignalOrigin::Neighbour);
    }

    #[test]
    fn snapshot_lookups() {
        let snapshot = TickSnapshot {
            tick: Some(4),
            green: 1,
            yellow: 2,
            orange: 3,
            red: 4,
            average_risk_perception: 3.1,
            government_signals: 10,
            media_signals: 3,
            neighbour_signals: 7,
            grid_signals: 5,
        };
        assert_eq!(snapshot.total_agents(), 10);
        assert_eq!(snapshot.count(ColorCategory::Orange), 3);
        assert_eq!(snapshot.signals(SignalOrigin::Grid), 5);
        assert_eq!(snapshot.signals(SignalOrigin::Government), 10);
    }
}
