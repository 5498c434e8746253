//! One agent activation: read the media, process the inbox, and maybe pass
//! the concern on to neighbours.
//!
//! # Order of operations
//!
//! 1. Media gate. With the agent's consumption probability it looks at the
//!    media; with the media's intensity it actually sees a report. If the
//!    media is reporting, a media signal lands in the agent's own inbox.
//! 2. If the inbox is empty, nothing else happens.
//! 3. Neighbour signals collapse to their mean, which then counts once
//!    alongside every institutional signal.
//! 4. The risk perception is multiplied by the mean of (signal mean,
//!    benefit multiplier, technological fear multiplier) and saturated
//!    into `[1, 5]`.
//! 5. A threshold drawn uniformly from `[1, 5]` decides whether the agent
//!    talks: the higher its risk perception, the more likely. If it does,
//!    between one and half of its neighbours receive a signal derived from
//!    its new perception and the hazard.
//! 6. The inbox is cleared and the colour recomputed.
//!
//! Side effects on other parties (the media counter, neighbours' inboxes)
//! are returned as an [`Activation`] for the scheduler to apply, so that the
//! agent only ever borrows itself mutably.

use rand::Rng;
use rand::seq::index;
use riskflow_types::{AgentId, RiskSignal, SignalOrigin};

use crate::agent::Agent;
use crate::hazard::Hazard;
use crate::media::Media;
use crate::scale::rescale;

/// What one activation did beyond the agent's own state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activation {
    /// A media signal reached the agent; the media counter must grow by one.
    pub media_signal_received: bool,
    /// The inbox was non-empty and the risk perception was recomputed.
    pub perception_updated: bool,
    /// Signals to place in neighbours' inboxes.
    pub outgoing: Vec<(AgentId, RiskSignal)>,
}

impl Agent {
    /// Run one activation of this agent.
    ///
    /// `neighbours` is the agent's adjacency list in the social network.
    pub fn tick_behaviour<R: Rng + ?Sized>(
        &mut self,
        media: &Media,
        hazard: &Hazard,
        neighbours: &[AgentId],
        rng: &mut R,
    ) -> Activation {
        let mut activation = Activation::default();

        if rng.random::<f64>() < self.media_consumption_probability
            && rng.random::<f64>() < media.intensity()
            && media.is_reporting()
        {
            self.receive(media.signal(hazard));
            activation.media_signal_received = true;
        }

        if self.inbox.is_empty() {
            return activation;
        }

        let signal_mean = self.aggregate_inbox();
        let factor =
            (signal_mean + self.benefit_multiplier + self.technological_fear_multiplier) / 3.0;
        self.set_risk_perception(self.risk_perception * factor);
        activation.perception_updated = true;

        let threshold = rescale(rng.random::<f64>(), 0.0, 1.0, 5.0, 1.0);
        if threshold <= self.risk_perception {
            activation.outgoing = self.pass_on(hazard, neighbours, rng);
        }

        activation
    }

    /// Drain the inbox into one mean magnitude, with all neighbour signals
    /// first collapsed into a single entry.
    fn aggregate_inbox(&mut self) -> f64 {
        let mut sum = 0.0;
        let mut count: usize = 0;
        let mut neighbour_sum = 0.0;
        let mut neighbour_count: usize = 0;

        for signal in self.inbox.drain(..) {
            if signal.origin().is_neighbour() {
                neighbour_sum += signal.magnitude();
                neighbour_count = neighbour_count.saturating_add(1);
            } else {
                sum += signal.magnitude();
                count = count.saturating_add(1);
            }
        }

        if neighbour_count > 0 {
            self.received_total = self
                .received_total
                .saturating_add(u64::try_from(neighbour_count).unwrap_or(u64::MAX));
            sum += neighbour_sum / neighbour_count as f64;
            count = count.saturating_add(1);
        }

        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Pick between one and `degree / 2` distinct neighbours and address a
    /// neighbour signal to each. Agents with fewer than two neighbours stay
    /// silent.
    fn pass_on<R: Rng + ?Sized>(
        &mut self,
        hazard: &Hazard,
        neighbours: &[AgentId],
        rng: &mut R,
    ) -> Vec<(AgentId, RiskSignal)> {
        let degree = neighbours.len();
        if degree < 2 {
            return Vec::new();
        }

        let magnitude =
            rescale(self.risk_perception, 1.0, 5.0, 2.0, 0.1) * hazard.risk_multiplier();
        let signal = RiskSignal::new(SignalOrigin::Neighbour, magnitude);
        let amount = rng.random_range(1..=degree / 2);

        let outgoing: Vec<(AgentId, RiskSignal)> = index::sample(rng, degree, amount)
            .into_iter()
            .filter_map(|position| neighbours.get(position).map(|id| (*id, signal)))
            .collect();

        self.sent_this_tick = self
            .sent_this_tick
            .saturating_add(u64::try_from(outgoing.len()).unwrap_or(u64::MAX));
        outgoing
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::traits::TraitDraw;

    fn agent(risk: f64, benefit: f64, fear: f64, media_consumption: f64) -> Agent {
        let traits = TraitDraw {
            risk_perception: risk,
            benefit_perception: benefit,
            technological_fear: fear,
        };
        Agent::from_traits(AgentId::new(0), traits, media_consumption)
    }

    fn ring(count: usize) -> Vec<AgentId> {
        (1..=count).map(AgentId::new).collect()
    }

    fn automation() -> Hazard {
        Hazard::new("Automation", 1.3)
    }

    #[test]
    fn idle_agent_is_unchanged() {
        let mut subject = agent(3.0, 3.0, 3.0, 1.0);
        let before = subject.clone();
        let mut rng = StdRng::seed_from_u64(1);
        let activation = subject.tick_behaviour(&Media::new(), &automation(), &ring(4), &mut rng);
        assert_eq!(activation, Activation::default());
        assert_eq!(subject, before);
    }

    #[test]
    fn institutional_signal_updates_perception() {
        // benefit 5 -> 1.0, fear 1 -> 1.0; factor = mean(1.3, 1.0, 1.0) = 1.1
        let mut subject = agent(3.0, 5.0, 1.0, 0.0);
        subject.receive(RiskSignal::new(SignalOrigin::Grid, 1.3));
        let mut rng = StdRng::seed_from_u64(2);
        let activation = subject.tick_behaviour(&Media::new(), &automation(), &[], &mut rng);
        assert!(activation.perception_updated);
        assert!(activation.outgoing.is_empty());
        assert!((subject.risk_perception() - 3.3).abs() < 1e-12);
        assert!(subject.inbox().is_empty());
        assert_eq!(subject.received_total(), 0);
    }

    #[test]
    fn neighbour_signals_collapse_to_their_mean() {
        // magnitudes [0.4, mean(2.0, 1.0)] -> 0.95; factor = (0.95 + 1 + 1) / 3
        let mut subject = agent(3.0, 5.0, 1.0, 0.0);
        subject.receive(RiskSignal::new(SignalOrigin::Neighbour, 2.0));
        subject.receive(RiskSignal::new(SignalOrigin::Government, 0.4));
        subject.receive(RiskSignal::new(SignalOrigin::Neighbour, 1.0));
        let mut rng = StdRng::seed_from_u64(3);
        let _ = subject.tick_behaviour(&Media::new(), &automation(), &[], &mut rng);
        assert!((subject.risk_perception() - 2.95).abs() < 1e-12);
        assert_eq!(subject.received_total(), 2);
    }

    #[test]
    fn perception_saturates_and_recolours() {
        let mut subject = agent(4.5, 5.0, 5.0, 0.0);
        subject.receive(RiskSignal::new(SignalOrigin::Grid, 2.0));
        let mut rng = StdRng::seed_from_u64(4);
        let _ = subject.tick_behaviour(&Media::new(), &automation(), &[], &mut rng);
        assert!((subject.risk_perception() - 5.0).abs() < f64::EPSILON);
        assert_eq!(
            subject.color(),
            riskflow_types::ColorCategory::Red
        );

        let mut calm = agent(1.2, 1.0, 1.0, 0.0);
        calm.receive(RiskSignal::new(SignalOrigin::Grid, 0.1));
        let _ = calm.tick_behaviour(&Media::new(), &automation(), &[], &mut rng);
        assert!((calm.risk_perception() - 1.0).abs() < f64::EPSILON);
        assert_eq!(calm.color(), riskflow_types::ColorCategory::Green);
    }

    #[test]
    fn alarmed_agent_tells_up_to_half_its_neighbours() {
        let neighbours = ring(6);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let mut subject = agent(5.0, 5.0, 5.0, 0.0);
            subject.receive(RiskSignal::new(SignalOrigin::Grid, 2.0));
            let activation = subject.tick_behaviour(&Media::new(), &automation(), &neighbours, &mut rng);

            let count = activation.outgoing.len();
            assert!((1..=3).contains(&count), "sent to {count} neighbours");
            let targets: BTreeSet<AgentId> = activation.outgoing.iter().map(|(id, _)| *id).collect();
            assert_eq!(targets.len(), count);
            assert!(targets.iter().all(|id| neighbours.contains(id)));
            for (_, signal) in &activation.outgoing {
                assert_eq!(signal.origin(), SignalOrigin::Neighbour);
                // rescale(5) = 2.0, times 1.3, saturated at 2.0
                assert!((signal.magnitude() - 2.0).abs() < f64::EPSILON);
            }
            assert_eq!(subject.peek_sent_this_tick(), count as u64);
        }
    }

    #[test]
    fn single_tie_stays_silent() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut subject = agent(5.0, 5.0, 5.0, 0.0);
        subject.receive(RiskSignal::new(SignalOrigin::Grid, 2.0));
        let activation = subject.tick_behaviour(&Media::new(), &automation(), &ring(1), &mut rng);
        assert!(activation.perception_updated);
        assert!(activation.outgoing.is_empty());
        assert_eq!(subject.peek_sent_this_tick(), 0);
    }

    #[test]
    fn calm_agent_does_not_talk() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut subject = agent(1.0, 1.0, 1.0, 0.0);
            subject.receive(RiskSignal::new(SignalOrigin::Grid, 0.1));
            let activation = subject.tick_behaviour(&Media::new(), &automation(), &ring(8), &mut rng);
            assert!(activation.outgoing.is_empty());
        }
    }

    #[test]
    fn media_reaches_consumers_only_while_reporting() {
        let hazard = automation();
        let mut rng = StdRng::seed_from_u64(8);

        let silent = Media::new();
        let mut reader = agent(3.0, 3.0, 3.0, 1.0);
        for _ in 0..100 {
            let activation = reader.tick_behaviour(&silent, &hazard, &[], &mut rng);
            assert!(!activation.media_signal_received);
        }

        let mut reporting = Media::new();
        reporting.start_reporting(1.2, 0.8);
        let mut delivered = 0_u32;
        for _ in 0..200 {
            let activation = reader.tick_behaviour(&reporting, &hazard, &[], &mut rng);
            if activation.media_signal_received {
                delivered += 1;
                assert!(activation.perception_updated);
            }
        }
        // Expected share is 0.8.
        assert!((120..=190).contains(&delivered), "delivered {delivered}");

        let mut abstainer = agent(3.0, 3.0, 3.0, 0.0);
        for _ in 0..100 {
            let activation = abstainer.tick_behaviour(&reporting, &hazard, &[], &mut rng);
            assert!(!activation.media_signal_received);
        }
    }
}
