//! Error types for the `riskflow-network` crate.
//!
//! All fallible operations in this crate return [`NetworkError`] through the
//! standard [`Result`] type.

use riskflow_types::AgentId;

/// Errors that can occur while building or querying a social network.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The preferential-attachment parameters cannot produce a graph.
    #[error("invalid network parameters: n={nodes}, m={edges_per_node} (requires n > m >= 1)")]
    InvalidParameters {
        /// Requested number of nodes.
        nodes: usize,
        /// Requested number of edges per attached node.
        edges_per_node: usize,
    },

    /// The attachment pool holds fewer distinct nodes than targets needed.
    #[error("cannot draw {wanted} distinct targets from a pool of {available} distinct nodes")]
    SubsetUnreachable {
        /// Targets required.
        wanted: usize,
        /// Distinct nodes present in the pool.
        available: usize,
    },

    /// A node was not found in the network.
    #[error("node not found: {0}")]
    NodeNotFound(AgentId),

    /// An edge would connect a node to itself.
    #[error("self-loop rejected at {0}")]
    SelfLoop(AgentId),
}
