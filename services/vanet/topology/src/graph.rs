//! Proximity graph: index-addressed adjacency lists rebuilt wholesale each step.

use crate::node::{Node, NodeId};

/// Symmetric, irreflexive adjacency over node identities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityGraph {
    /// adjacency[i] lists the neighbors of node i in ascending order
    adjacency: Vec<Vec<NodeId>>,
}

impl ProximityGraph {
    /// Build the graph by testing every unordered pair against the squared range
    pub fn build(nodes: &[Node], range_sq: f64) -> Self {
        let mut adjacency = vec![Vec::new(); nodes.len()];

        for (i, a) in nodes.iter().enumerate() {
            for (j, b) in nodes.iter().enumerate().skip(i + 1) {
                if a.position.distance_sq(&b.position) <= range_sq {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }

        // Lower ids land in a list during earlier outer iterations, higher ids
        // during the node's own iteration, so every list is already ascending.
        debug_assert!(adjacency.iter().all(|l| l.windows(2).all(|w| w[0] < w[1])));

        Self { adjacency }
    }

    /// Neighbors of a node; unknown ids have none
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether two nodes are adjacent
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Whether the graph covers this node id
    pub fn contains(&self, id: NodeId) -> bool {
        id < self.adjacency.len()
    }

    /// Number of nodes covered
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}
