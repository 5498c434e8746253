//! Shared type definitions for the Riskflow simulation.
//!
//! This crate is the single source of truth for the value types passed
//! between the network, the agents, the scheduler, and the recorder.
//!
//! # Modules
//!
//! - [`bounds`] -- Perception and signal-magnitude domains plus saturation
//! - [`enums`] -- Signal origins and colour categories
//! - [`ids`] -- Type-safe agent identifier
//! - [`structs`] -- Risk signals, tick snapshots, and agent summaries

pub mod bounds;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use bounds::{
    MAX_PERCEPTION, MAX_SIGNAL_MAGNITUDE, MIN_PERCEPTION, MIN_SIGNAL_MAGNITUDE, clamp_magnitude,
    clamp_perception,
};
pub use enums::{ColorCategory, SignalOrigin};
pub use ids::AgentId;
pub use structs::{AgentSummary, RiskSignal, TickSnapshot};
