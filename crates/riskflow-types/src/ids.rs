//! Type-safe identifier for agents in the social network.
//!
//! Agents are created once per network and never removed, so their
//! identifier is a dense index into the network's node storage. The
//! newtype keeps node indices from being mixed up with counters or
//! degrees at compile time.

use serde::{Deserialize, Serialize};

/// Unique identifier for an agent (node) in the social network.
///
/// The wrapped value is the node's position in creation order: seed nodes
/// take `0..m`, every node attached afterwards takes the next index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl AgentId {
    /// Create an identifier from a node index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the node index wrapped by this identifier.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

impl From<usize> for AgentId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<AgentId> for usize {
    fn from(id: AgentId) -> Self {
        id.0
    }
}
