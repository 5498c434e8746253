//! Structural and perceptual summaries of a social network.
//!
//! The tie matrix and the perception-distance matrix let a run be compared
//! with itself: distances taken before and after a run show whether tied
//! agents drifted towards each other.

use riskflow_agents::Agent;
use riskflow_network::SocialNetwork;
use riskflow_types::AgentId;
use serde::{Deserialize, Serialize};

/// Symmetric 0/1 tie matrix, rows and columns in id order.
pub fn adjacency_matrix<T>(network: &SocialNetwork<T>) -> Vec<Vec<u8>> {
    let size = network.node_count();
    network
        .agent_ids()
        .map(|row| {
            (0..size)
                .map(|column| u8::from(network.has_edge(row, AgentId::new(column))))
                .collect()
        })
        .collect()
}

/// Absolute pairwise differences of current risk perception, rows and
/// columns in id order.
pub fn perception_distance_matrix(network: &SocialNetwork<Agent>) -> Vec<Vec<f64>> {
    let perceptions: Vec<f64> = network
        .nodes()
        .map(|(_, agent)| agent.risk_perception())
        .collect();
    perceptions
        .iter()
        .map(|a| perceptions.iter().map(|b| (a - b).abs()).collect())
        .collect()
}

/// Degree distribution summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegreeStats {
    /// Smallest degree.
    pub min: usize,
    /// Largest degree.
    pub max: usize,
    /// Mean degree, `2 * edges / nodes`.
    pub mean: f64,
}

impl DegreeStats {
    /// Summarise a network's degrees; `None` for an empty network.
    pub fn from_network<T>(network: &SocialNetwork<T>) -> Option<Self> {
        let degrees: Vec<usize> = network.agent_ids().map(|id| network.degree(id)).collect();
        let min = degrees.iter().copied().min()?;
        let max = degrees.iter().copied().max()?;
        let total: usize = degrees.iter().copied().fold(0, usize::saturating_add);
        Some(Self {
            min,
            max,
            mean: total as f64 / degrees.len() as f64,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use riskflow_agents::TraitDraw;

    use super::*;

    fn path_of_three() -> SocialNetwork<Agent> {
        let mut network = SocialNetwork::new();
        for (index, risk) in [1.5, 3.0, 4.5].into_iter().enumerate() {
            let traits = TraitDraw {
                risk_perception: risk,
                benefit_perception: 3.0,
                technological_fear: 3.0,
            };
            let _ = network.add_node(Agent::from_traits(AgentId::new(index), traits, 0.5));
        }
        network.add_edge(AgentId::new(0), AgentId::new(1)).unwrap();
        network.add_edge(AgentId::new(1), AgentId::new(2)).unwrap();
        network
    }

    #[test]
    fn tie_matrix_is_symmetric() {
        let matrix = adjacency_matrix(&path_of_three());
        assert_eq!(matrix, vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn distances_are_absolute_differences() {
        let matrix = perception_distance_matrix(&path_of_three());
        let expected = [[0.0, 1.5, 3.0], [1.5, 0.0, 1.5], [3.0, 1.5, 0.0]];
        for (row, want_row) in matrix.iter().zip(expected) {
            for (value, want) in row.iter().zip(want_row) {
                assert!((value - want).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn degree_summary() {
        let stats = DegreeStats::from_network(&path_of_three()).unwrap();
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 2);
        assert!((stats.mean - 4.0 / 3.0).abs() < 1e-12);
        assert!(DegreeStats::from_network(&SocialNetwork::<Agent>::new()).is_none());
    }
}
