//! Barabási–Albert preferential-attachment network growth.
//!
//! The graph starts with `m` unconnected seed nodes. Each new node is tied
//! to `m` targets, then the targets and `m` copies of the new node are
//! appended to an [`AttachmentPool`]. The next targets are drawn from that
//! pool, so nodes that already have many ties are proportionally more
//! likely to gain another one.
//!
//! The pool is sampled once more after the last node is attached. That
//! draw is unused; every attached node consumes exactly one subset draw.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use riskflow_types::AgentId;
use tracing::debug;

use crate::error::NetworkError;
use crate::graph::SocialNetwork;

/// Multiset of node ids weighted by how often each node has been a tie
/// endpoint.
#[derive(Debug, Clone, Default)]
pub struct AttachmentPool {
    entries: Vec<AgentId>,
    distinct: BTreeSet<AgentId>,
}

impl AttachmentPool {
    /// Create an empty pool.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            distinct: BTreeSet::new(),
        }
    }

    /// Append one entry for `id`.
    pub fn push(&mut self, id: AgentId) {
        self.entries.push(id);
        self.distinct.insert(id);
    }

    /// Append one entry for each id.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = AgentId>) {
        for id in ids {
            self.push(id);
        }
    }

    /// Total entries, counting repeats.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct ids in the pool.
    pub fn distinct_len(&self) -> usize {
        self.distinct.len()
    }

    /// Draw `wanted` distinct ids by repeated uniform picks from the
    /// multiset.
    ///
    /// Duplicates are discarded, so the loop keeps picking until enough
    /// distinct ids are collected. The result is sorted.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::SubsetUnreachable`] if the pool holds fewer
    /// than `wanted` distinct ids, which would otherwise never terminate.
    pub fn sample_distinct<R: Rng + ?Sized>(
        &self,
        wanted: usize,
        rng: &mut R,
    ) -> Result<Vec<AgentId>, NetworkError> {
        if self.distinct.len() < wanted {
            return Err(NetworkError::SubsetUnreachable {
                wanted,
                available: self.distinct.len(),
            });
        }
        let mut picked = BTreeSet::new();
        while picked.len() < wanted {
            if let Some(id) = self.entries.choose(rng) {
                picked.insert(*id);
            }
        }
        Ok(picked.into_iter().collect())
    }
}

/// Grow a preferential-attachment network of `nodes` nodes, tying each
/// non-seed node to `edges_per_node` existing nodes.
///
/// `factory` builds the payload for every node as it is created, in id
/// order, and receives the same generator so that payload draws interleave
/// with the attachment draws deterministically.
///
/// The result has exactly `edges_per_node * (nodes - edges_per_node)`
/// edges and every non-seed node has degree of at least `edges_per_node`.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidParameters`] unless
/// `nodes > edges_per_node >= 1`.
pub fn barabasi_albert<T, R, F>(
    nodes: usize,
    edges_per_node: usize,
    rng: &mut R,
    mut factory: F,
) -> Result<SocialNetwork<T>, NetworkError>
where
    R: Rng + ?Sized,
    F: FnMut(AgentId, &mut R) -> T,
{
    if edges_per_node < 1 || edges_per_node >= nodes {
        return Err(NetworkError::InvalidParameters {
            nodes,
            edges_per_node,
        });
    }

    let mut network = SocialNetwork::new();
    let mut targets = Vec::with_capacity(edges_per_node);
    for index in 0..edges_per_node {
        let payload = factory(AgentId::new(index), rng);
        targets.push(network.add_node(payload));
    }

    let mut pool = AttachmentPool::new();
    for index in edges_per_node..nodes {
        let payload = factory(AgentId::new(index), rng);
        let source = network.add_node(payload);
        for target in &targets {
            network.add_edge(source, *target)?;
        }
        pool.extend(targets.iter().copied());
        pool.extend(std::iter::repeat_n(source, edges_per_node));
        targets = pool.sample_distinct(edges_per_node, rng)?;
    }

    debug!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        pool = pool.len(),
        "preferential-attachment network grown"
    );
    Ok(network)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn grow(nodes: usize, edges_per_node: usize, seed: u64) -> SocialNetwork<usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        barabasi_albert(nodes, edges_per_node, &mut rng, |id, _| id.index()).unwrap()
    }

    #[test]
    fn ten_nodes_three_ties_each() {
        let network = grow(10, 3, 7);
        assert_eq!(network.node_count(), 10);
        assert_eq!(network.edge_count(), 21);
        for index in 3..10 {
            assert!(network.degree(AgentId::new(index)) >= 3);
        }
    }

    #[test]
    fn edge_count_formula_holds() {
        for (nodes, m) in [(2, 1), (50, 1), (50, 3), (100, 5)] {
            let network = grow(nodes, m, 11);
            assert_eq!(network.edge_count(), m * (nodes - m));
        }
    }

    #[test]
    fn no_self_loops_or_duplicates() {
        let network = grow(80, 4, 3);
        for (id, _) in network.nodes() {
            let neighbours = network.neighbours(id);
            assert!(!neighbours.contains(&id));
            assert!(neighbours.is_sorted());
            let unique: BTreeSet<_> = neighbours.iter().collect();
            assert_eq!(unique.len(), neighbours.len());
        }
        let doubled: usize = network.agent_ids().map(|id| network.degree(id)).sum();
        assert_eq!(doubled, network.edge_count() * 2);
    }

    #[test]
    fn payloads_follow_id_order() {
        let network = grow(20, 2, 5);
        for (id, payload) in network.nodes() {
            assert_eq!(id.index(), *payload);
        }
    }

    #[test]
    fn invalid_parameters_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        for (nodes, m) in [(10, 0), (3, 3), (2, 5), (0, 0)] {
            let result = barabasi_albert(nodes, m, &mut rng, |id, _| id);
            assert!(matches!(
                result,
                Err(NetworkError::InvalidParameters { .. })
            ));
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let a = grow(60, 3, 42);
        let b = grow(60, 3, 42);
        let edges_a: Vec<_> = a.edges().collect();
        let edges_b: Vec<_> = b.edges().collect();
        assert_eq!(edges_a, edges_b);
    }

    #[test]
    fn repeated_entries_are_favoured() {
        let mut pool = AttachmentPool::new();
        pool.extend([0, 0, 0, 0, 1].map(AgentId::new));
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.distinct_len(), 2);

        let mut rng = StdRng::seed_from_u64(9);
        let mut zero_hits = 0_u32;
        for _ in 0..1000 {
            let picked = pool.sample_distinct(1, &mut rng).unwrap();
            if picked == [AgentId::new(0)] {
                zero_hits += 1;
            }
        }
        // Expected share is 0.8.
        assert!(zero_hits > 700, "zero picked {zero_hits} times");
        assert!(zero_hits < 900, "zero picked {zero_hits} times");
    }

    #[test]
    fn sample_distinct_returns_sorted_unique_ids() {
        let mut pool = AttachmentPool::new();
        pool.extend([5, 2, 2, 9, 5, 1].map(AgentId::new));
        let mut rng = StdRng::seed_from_u64(2);
        let picked = pool.sample_distinct(4, &mut rng).unwrap();
        assert_eq!(
            picked,
            [1, 2, 5, 9].map(AgentId::new).to_vec()
        );
    }

    #[test]
    fn unreachable_subset_is_an_error() {
        let mut pool = AttachmentPool::new();
        pool.extend([3, 3, 3].map(AgentId::new));
        let mut rng = StdRng::seed_from_u64(2);
        let result = pool.sample_distinct(2, &mut rng);
        assert!(matches!(
            result,
            Err(NetworkError::SubsetUnreachable {
                wanted: 2,
                available: 1
            })
        ));
    }
}
