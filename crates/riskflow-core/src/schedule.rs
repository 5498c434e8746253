//! Tick schedule for a simulation run.
//!
//! The schedule is the single source of truth for temporal state in a run.
//! It tracks the next tick to execute and derives, from the tick number
//! alone, which scenario events fire on it: the hazard strike, the start of
//! media reporting, and government communication.
//!
//! # Design Principles
//!
//! - All derivations use checked arithmetic (no silent overflow).
//! - Events are computed from the tick counter, never stored independently.

use tracing::warn;

use crate::config::{ConfigError, ScenarioConfig};

/// The scenario events due on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvents {
    /// The tick these events belong to.
    pub tick: u64,
    /// The hazard strikes on this tick.
    pub hazard_strikes: bool,
    /// Media reporting starts on this tick.
    pub media_starts: bool,
    /// The government broadcasts on this tick.
    pub government_communicates: bool,
}

/// Event timetable and tick counter of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSchedule {
    /// Next tick to execute (0-indexed).
    next_tick: u64,

    /// Ticks per run.
    num_ticks: u64,

    /// Tick at which the hazard strikes.
    hazard_tick: u64,

    /// Tick at which media reporting starts.
    media_start_tick: u64,

    /// First tick of government communication.
    government_delay: u64,

    /// First tick after government communication (exclusive end).
    government_stop: u64,
}

impl TickSchedule {
    /// Build the schedule of a scenario, starting before tick 0.
    ///
    /// A window that never opens or a hazard that falls outside the run is
    /// allowed but logged, since the run degenerates into a quiet baseline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the media start tick overflows.
    pub fn new(scenario: &ScenarioConfig) -> Result<Self, ConfigError> {
        let media_start_tick = scenario.media_start().ok_or_else(|| ConfigError::Invalid {
            reason: "hazard_triggered + media_delay overflows".to_owned(),
        })?;

        if scenario.government_stop <= scenario.government_delay {
            warn!(
                government_delay = scenario.government_delay,
                government_stop = scenario.government_stop,
                "government window is empty; no government signals will be sent"
            );
        }
        if scenario.hazard_triggered >= scenario.num_ticks {
            warn!(
                hazard_triggered = scenario.hazard_triggered,
                num_ticks = scenario.num_ticks,
                "hazard falls outside the run"
            );
        }

        Ok(Self {
            next_tick: 0,
            num_ticks: scenario.num_ticks,
            hazard_tick: scenario.hazard_triggered,
            media_start_tick,
            government_delay: scenario.government_delay,
            government_stop: scenario.government_stop,
        })
    }

    /// Return the next tick to execute.
    pub const fn next_tick(&self) -> u64 {
        self.next_tick
    }

    /// Return the number of ticks in a run.
    pub const fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    /// Whether every tick of the run has been handed out.
    pub const fn is_finished(&self) -> bool {
        self.next_tick >= self.num_ticks
    }

    /// Hand out the next tick with its events and move the counter on.
    ///
    /// Returns `None` once the run is over.
    pub fn advance(&mut self) -> Option<TickEvents> {
        if self.is_finished() {
            return None;
        }
        let events = self.events_at(self.next_tick);
        self.next_tick = self.next_tick.checked_add(1)?;
        Some(events)
    }

    /// Rewind to before tick 0.
    pub const fn reset(&mut self) {
        self.next_tick = 0;
    }

    /// Derive the events due on `tick`.
    pub const fn events_at(&self, tick: u64) -> TickEvents {
        TickEvents {
            tick,
            hazard_strikes: tick == self.hazard_tick,
            media_starts: tick == self.media_start_tick,
            government_communicates: self.government_delay <= tick && tick < self.government_stop,
        }
    }

    /// Tick at which the hazard strikes.
    pub const fn hazard_tick(&self) -> u64 {
        self.hazard_tick
    }

    /// Tick at which media reporting starts.
    pub const fn media_start_tick(&self) -> u64 {
        self.media_start_tick
    }

    /// Government window as `(first, end_exclusive)`.
    pub const fn government_window(&self) -> (u64, u64) {
        (self.government_delay, self.government_stop)
    }
}
