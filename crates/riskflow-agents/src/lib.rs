//! Agents, their risk-signal diffusion, and the institutions around them.
//!
//! This crate is the behavioural layer of the simulation. It owns no
//! network and no schedule: the scheduler in `riskflow-core` hands each
//! agent its neighbour list and the institutions at activation time, and
//! applies the returned [`Activation`] to the rest of the population.
//!
//! # Modules
//!
//! - [`agent`] -- [`Agent`] state, counters, and reset
//! - [`config`] -- Trait distribution parameters ([`TraitDistribution`])
//! - [`diffusion`] -- One agent activation ([`Activation`])
//! - [`error`] -- Error types for population setup ([`AgentError`])
//! - [`government`] -- Windowed government broadcasts ([`Government`])
//! - [`hazard`] -- The hazard event and its multiplier ([`Hazard`])
//! - [`media`] -- Media reporting with feedback on intensity ([`Media`])
//! - [`scale`] -- Linear range mapping
//! - [`traits`] -- Correlated trait draws ([`TraitSampler`])

pub mod agent;
pub mod config;
pub mod diffusion;
pub mod error;
pub mod government;
pub mod hazard;
pub mod media;
pub mod scale;
pub mod traits;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use config::{DEFAULT_TRAIT_COVARIANCE, DEFAULT_TRAIT_MEAN, TraitDistribution};
pub use diffusion::Activation;
pub use error::AgentError;
pub use government::Government;
pub use hazard::Hazard;
pub use media::{MAX_MEDIA_INTENSITY, Media, REPORTING_LENGTH_STEP};
pub use scale::rescale;
pub use traits::{TraitDraw, TraitSampler};
