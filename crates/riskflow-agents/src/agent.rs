//! Agent state and lifecycle.
//!
//! An [`Agent`] is one member of the social network. Its traits are drawn
//! once at creation and never change; its risk perception moves as it
//! processes risk signals. The agent remembers the perception it started
//! with so the same population can be replayed in several runs.
//!
//! Neighbour lists live in the network, not in the agent. The diffusion
//! step (see [`crate::diffusion`]) receives them as a borrowed slice.

use rand::Rng;
use riskflow_types::{AgentId, AgentSummary, ColorCategory, RiskSignal, clamp_perception};

use crate::scale::rescale;
use crate::traits::{TraitDraw, TraitSampler};

/// A network participant whose risk perception evolves over a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub(crate) id: AgentId,
    pub(crate) risk_perception: f64,
    pub(crate) original_risk_perception: f64,
    pub(crate) benefit_perception: f64,
    pub(crate) technological_fear: f64,
    pub(crate) benefit_multiplier: f64,
    pub(crate) technological_fear_multiplier: f64,
    pub(crate) media_consumption_probability: f64,
    pub(crate) color: ColorCategory,
    pub(crate) inbox: Vec<RiskSignal>,
    pub(crate) sent_this_tick: u64,
    pub(crate) sent_total: u64,
    pub(crate) received_total: u64,
}

impl Agent {
    /// Create an agent with freshly drawn traits.
    ///
    /// The media consumption probability is drawn first, uniformly from
    /// `[0, 1)`, then the three correlated traits.
    pub fn spawn<R: Rng + ?Sized>(id: AgentId, sampler: &TraitSampler, rng: &mut R) -> Self {
        let media_consumption_probability = rng.random::<f64>();
        let traits = sampler.sample(rng);
        Self::from_traits(id, traits, media_consumption_probability)
    }

    /// Create an agent from known trait values.
    ///
    /// Traits are clipped into `[1, 5]` and the probability into `[0, 1]`.
    pub fn from_traits(id: AgentId, traits: TraitDraw, media_consumption_probability: f64) -> Self {
        let risk_perception = clamp_perception(traits.risk_perception);
        let benefit_perception = clamp_perception(traits.benefit_perception);
        let technological_fear = clamp_perception(traits.technological_fear);
        Self {
            id,
            risk_perception,
            original_risk_perception: risk_perception,
            benefit_perception,
            technological_fear,
            benefit_multiplier: rescale(benefit_perception, 1.0, 5.0, 1.0, 0.1),
            technological_fear_multiplier: rescale(technological_fear, 1.0, 5.0, 2.0, 1.0),
            media_consumption_probability: media_consumption_probability.clamp(0.0, 1.0),
            color: ColorCategory::from_risk_perception(risk_perception),
            inbox: Vec::new(),
            sent_this_tick: 0,
            sent_total: 0,
            received_total: 0,
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The agent's id, equal to its node index in the network.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Current risk perception, always in `[1, 5]`.
    pub const fn risk_perception(&self) -> f64 {
        self.risk_perception
    }

    /// Risk perception at creation, restored by [`Agent::reinitialise`].
    pub const fn original_risk_perception(&self) -> f64 {
        self.original_risk_perception
    }

    /// Benefit perception in `[1, 5]`.
    pub const fn benefit_perception(&self) -> f64 {
        self.benefit_perception
    }

    /// Technological fear in `[1, 5]`.
    pub const fn technological_fear(&self) -> f64 {
        self.technological_fear
    }

    /// Damping term from perceived benefit, in `[0.1, 1.0]`.
    pub const fn benefit_multiplier(&self) -> f64 {
        self.benefit_multiplier
    }

    /// Amplifying term from technological fear, in `[1.0, 2.0]`.
    pub const fn technological_fear_multiplier(&self) -> f64 {
        self.technological_fear_multiplier
    }

    /// Chance per tick that the agent looks at the media.
    pub const fn media_consumption_probability(&self) -> f64 {
        self.media_consumption_probability
    }

    /// Colour category of the current risk perception.
    pub const fn color(&self) -> ColorCategory {
        self.color
    }

    // -------------------------------------------------------------------
    // Inbox
    // -------------------------------------------------------------------

    /// Queue a signal for processing at the agent's next activation.
    pub fn receive(&mut self, signal: RiskSignal) {
        self.inbox.push(signal);
    }

    /// Signals waiting for the next activation, in arrival order.
    pub fn inbox(&self) -> &[RiskSignal] {
        &self.inbox
    }

    // -------------------------------------------------------------------
    // Counters
    // -------------------------------------------------------------------

    /// Neighbour signals sent since the last drain, without resetting.
    pub const fn peek_sent_this_tick(&self) -> u64 {
        self.sent_this_tick
    }

    /// Return the neighbour signals sent since the last drain, fold them
    /// into the run total and reset the per-tick counter.
    pub const fn drain_sent_this_tick(&mut self) -> u64 {
        let sent = self.sent_this_tick;
        self.sent_total = self.sent_total.saturating_add(sent);
        self.sent_this_tick = 0;
        sent
    }

    /// Neighbour signals sent over the run, up to the last drain.
    pub const fn sent_total(&self) -> u64 {
        self.sent_total
    }

    /// Neighbour signals processed over the run.
    pub const fn received_total(&self) -> u64 {
        self.received_total
    }

    /// Post-run statistics for this agent.
    pub const fn summary(&self, degree: usize) -> AgentSummary {
        AgentSummary {
            agent_id: self.id,
            degree,
            total_sent: self.sent_total,
            total_received: self.received_total,
        }
    }

    // -------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------

    /// Restore the pre-run state: original risk perception, empty inbox,
    /// zeroed counters. Traits are kept.
    pub fn reinitialise(&mut self) {
        self.inbox.clear();
        self.sent_this_tick = 0;
        self.sent_total = 0;
        self.received_total = 0;
        self.set_risk_perception(self.original_risk_perception);
    }

    /// Saturate a new risk perception into `[1, 5]` and recolour.
    pub(crate) fn set_risk_perception(&mut self, value: f64) {
        self.risk_perception = clamp_perception(value);
        self.color = ColorCategory::from_risk_perception(self.risk_perception);
    }
}
