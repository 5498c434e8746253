//! Social network structure for the Riskflow simulation.
//!
//! Agents are nodes of an undirected, unweighted graph. Ties are created
//! once, when the network is grown, and stay fixed for every run that
//! reuses the network.
//!
//! # Modules
//!
//! - [`error`] -- Error types for graph construction.
//! - [`graph`] -- [`SocialNetwork`], the node store with symmetric sorted
//!   adjacency lists.
//! - [`preferential`] -- Barabási–Albert growth over an [`AttachmentPool`].

pub mod error;
pub mod graph;
pub mod preferential;

// Re-export primary types at crate root.
pub use error::NetworkError;
pub use graph::SocialNetwork;
pub use preferential::{AttachmentPool, barabasi_albert};
