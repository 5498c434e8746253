//! Social network graph: agents as nodes, undirected unweighted ties as edges.
//!
//! The [`SocialNetwork`] owns its node payloads in creation order, so a
//! node's [`AgentId`] is its index. Adjacency is stored per node as a
//! sorted, de-duplicated list of neighbour ids, which gives a stable
//! neighbour order for reproducible sampling and cheap indexed access.
//!
//! Edges are symmetric: adding `a -- b` indexes `b` under `a` and `a`
//! under `b`. Self-loops are rejected and duplicate edges are ignored.

use riskflow_types::AgentId;

use crate::error::NetworkError;

/// An undirected graph whose nodes carry a payload of type `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialNetwork<T> {
    /// Node payloads, indexed by `AgentId`.
    nodes: Vec<T>,
    /// Sorted neighbour lists, parallel to `nodes`.
    adjacency: Vec<Vec<AgentId>>,
    /// Number of undirected edges.
    edge_count: usize,
}

impl<T> SocialNetwork<T> {
    /// Create an empty network.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    // -------------------------------------------------------------------
    // Node operations
    // -------------------------------------------------------------------

    /// Add a node and return the id assigned to it.
    pub fn add_node(&mut self, node: T) -> AgentId {
        let id = AgentId::new(self.nodes.len());
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        id
    }

    /// Return the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the network has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get an immutable reference to a node's payload.
    pub fn node(&self, id: AgentId) -> Option<&T> {
        self.nodes.get(id.index())
    }

    /// Get a mutable reference to a node's payload.
    pub fn node_mut(&mut self, id: AgentId) -> Option<&mut T> {
        self.nodes.get_mut(id.index())
    }

    /// Return all node ids in creation order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + use<T> {
        (0..self.nodes.len()).map(AgentId::new)
    }

    /// Iterate over all nodes immutably.
    pub fn nodes(&self) -> impl Iterator<Item = (AgentId, &T)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (AgentId::new(index), node))
    }

    /// Iterate over all node payloads mutably.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.nodes.iter_mut()
    }

    /// Borrow a node mutably together with its neighbour list.
    ///
    /// The neighbour list is immutable for the lifetime of the borrow, which
    /// lets a node act on its own state while reading who it is tied to.
    pub fn node_and_neighbours_mut(&mut self, id: AgentId) -> Option<(&mut T, &[AgentId])> {
        let node = self.nodes.get_mut(id.index())?;
        let neighbours = self.adjacency.get(id.index())?;
        Some((node, neighbours.as_slice()))
    }

    // -------------------------------------------------------------------
    // Edge operations
    // -------------------------------------------------------------------

    /// Add an undirected edge between two existing nodes.
    ///
    /// Returns `true` if the edge was inserted, `false` if it already
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::SelfLoop`] when `a == b`, or
    /// [`NetworkError::NodeNotFound`] if either endpoint is missing.
    pub fn add_edge(&mut self, a: AgentId, b: AgentId) -> Result<bool, NetworkError> {
        if a == b {
            return Err(NetworkError::SelfLoop(a));
        }
        if b.index() >= self.adjacency.len() {
            return Err(NetworkError::NodeNotFound(b));
        }
        let a_list = self
            .adjacency
            .get_mut(a.index())
            .ok_or(NetworkError::NodeNotFound(a))?;
        let Err(pos) = a_list.binary_search(&b) else {
            return Ok(false);
        };
        a_list.insert(pos, b);

        let b_list = self
            .adjacency
            .get_mut(b.index())
            .ok_or(NetworkError::NodeNotFound(b))?;
        if let Err(pos) = b_list.binary_search(&a) {
            b_list.insert(pos, a);
        }

        self.edge_count = self.edge_count.saturating_add(1);
        Ok(true)
    }

    /// Return the number of undirected edges.
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `a` and `b` are tied.
    pub fn has_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.adjacency
            .get(a.index())
            .is_some_and(|list| list.binary_search(&b).is_ok())
    }

    /// Iterate over every edge once, as `(lower, higher)` id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (AgentId, AgentId)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(index, list)| {
                let from = AgentId::new(index);
                list.iter()
                    .copied()
                    .filter(move |to| from < *to)
                    .map(move |to| (from, to))
            })
    }

    // -------------------------------------------------------------------
    // Graph queries
    // -------------------------------------------------------------------

    /// Return the sorted neighbour ids of a node (empty if the node is
    /// missing).
    pub fn neighbours(&self, id: AgentId) -> &[AgentId] {
        self.adjacency.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Return the number of neighbours of a node.
    pub fn degree(&self, id: AgentId) -> usize {
        self.neighbours(id).len()
    }
}

impl<T> Default for SocialNetwork<T> {
    fn default() -> Self {
        Self::new()
    }
}
