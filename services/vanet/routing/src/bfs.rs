//! Breadth-first shortest-hop router

use crate::path::Path;
use crate::router::{HopPolicy, Router};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};
use vanet_topology::{NodeId, ProximityGraph};

/// Breadth-first search over the proximity graph
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsRouter {
    policy: HopPolicy,
}

impl BfsRouter {
    /// Router that explores the full reachable component
    pub fn new() -> Self {
        Self::default()
    }

    /// Router with an explicit hop policy
    pub fn with_policy(policy: HopPolicy) -> Self {
        Self { policy }
    }

    /// Active hop policy
    pub fn policy(&self) -> HopPolicy {
        self.policy
    }
}

impl Router for BfsRouter {
    fn route(
        &self,
        graph: &ProximityGraph,
        source: NodeId,
        destination: NodeId,
        max_hops: u8,
    ) -> Path {
        if !graph.contains(source) || !graph.contains(destination) {
            debug!("Route {} -> {}: unknown endpoint", source, destination);
            return Path::empty();
        }

        // parent[node] = (predecessor, depth); the source has no predecessor
        let mut parent: HashMap<NodeId, (Option<NodeId>, usize)> = HashMap::new();
        let mut frontier = VecDeque::new();

        parent.insert(source, (None, 0));
        frontier.push_back(source);

        while let Some(current) = frontier.pop_front() {
            if current == destination {
                break;
            }

            let depth = parent.get(&current).map(|&(_, d)| d).unwrap_or(0);
            if !self.admits(depth + 1, max_hops) {
                continue;
            }

            for &neighbor in graph.neighbors(current) {
                if !parent.contains_key(&neighbor) {
                    parent.insert(neighbor, (Some(current), depth + 1));
                    frontier.push_back(neighbor);
                }
            }
        }

        if !parent.contains_key(&destination) {
            debug!(
                "No route from {} to {} ({} nodes explored)",
                source,
                destination,
                parent.len()
            );
            return Path::empty();
        }

        let mut nodes = vec![destination];
        let mut cursor = destination;
        while let Some(&(Some(prev), _)) = parent.get(&cursor) {
            nodes.push(prev);
            cursor = prev;
        }
        nodes.reverse();

        let path = Path::new(nodes);
        trace!("Route {} -> {}: {}", source, destination, path);
        path
    }

    fn admits(&self, hops: usize, max_hops: u8) -> bool {
        match self.policy {
            HopPolicy::Unbounded => true,
            HopPolicy::EnforceTtl => hops <= max_hops as usize,
        }
    }
}
