//! Official communication about the hazard.

use riskflow_types::{RiskSignal, SignalOrigin};

use crate::agent::Agent;
use crate::hazard::Hazard;

/// The government, which broadcasts to every agent while its
/// communication window is open.
///
/// The window itself is owned by the scheduler; the government only knows
/// how strong its message is.
#[derive(Debug, Clone, PartialEq)]
pub struct Government {
    multiplier: f64,
}

impl Government {
    /// Create a government with a fixed signal multiplier.
    pub const fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    /// Base signal multiplier before the hazard is applied.
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// The signal each agent receives, saturated into `[0.1, 2.0]`.
    pub fn signal(&self, hazard: &Hazard) -> RiskSignal {
        RiskSignal::new(
            SignalOrigin::Government,
            self.multiplier * hazard.risk_multiplier(),
        )
    }

    /// Deliver one government signal to every target and return how many
    /// were sent.
    pub fn send_risk_signal<'a>(
        &self,
        targets: impl IntoIterator<Item = &'a mut Agent>,
        hazard: &Hazard,
    ) -> u64 {
        let signal = self.signal(hazard);
        let mut sent: u64 = 0;
        for agent in targets {
            agent.receive(signal);
            sent = sent.saturating_add(1);
        }
        sent
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use riskflow_types::AgentId;

    use super::*;
    use crate::traits::TraitDraw;

    fn population(count: usize) -> Vec<Agent> {
        let traits = TraitDraw {
            risk_perception: 3.0,
            benefit_perception: 3.0,
            technological_fear: 3.0,
        };
        (0..count)
            .map(|index| Agent::from_traits(AgentId::new(index), traits, 0.5))
            .collect()
    }

    #[test]
    fn broadcast_reaches_everyone() {
        let mut agents = population(6);
        let government = Government::new(0.4);
        let hazard = Hazard::new("Automation", 1.3);
        let sent = government.send_risk_signal(agents.iter_mut(), &hazard);
        assert_eq!(sent, 6);
        for agent in &agents {
            assert_eq!(agent.inbox().len(), 1);
            let signal = agent.inbox().first().unwrap();
            assert_eq!(signal.origin(), SignalOrigin::Government);
            assert!((signal.magnitude() - 0.52).abs() < 1e-12);
        }
    }

    #[test]
    fn weak_signal_saturates_at_floor() {
        let government = Government::new(0.05);
        let hazard = Hazard::new("Outage Detection", 0.7);
        let signal = government.signal(&hazard);
        assert!((signal.magnitude() - 0.1).abs() < f64::EPSILON);
    }
}
